#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use bandcoach::Config;
use clap::Parser;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;
mod ui;

use cli::commands::Cli;

fn log_level(verbose: u8, configured: &str) -> LevelFilter {
    match verbose {
        0 => LevelFilter::from_str(configured).unwrap_or(LevelFilter::WARN),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    config.validate()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, &config.logging.level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    app::dispatch::dispatch(cli, config).await
}
