use super::runner::{bounded, build_gateway, report, require_credential};
use crate::cli::commands::KeyCommands;
use crate::ui::style as ui;
use anyhow::{Context, Result};
use bandcoach::config::{CREDENTIAL_ENV_VARS, Config, CredentialSource};
use bandcoach::error::CoachError;
use bandcoach::llm::Credential;
use dialoguer::Password;

pub async fn handle_key_command(command: KeyCommands, mut config: Config) -> Result<()> {
    match command {
        KeyCommands::Set {
            api_key,
            skip_check,
        } => {
            let raw = match api_key {
                Some(key) => key,
                None => Password::new()
                    .with_prompt("Gemini API key (input hidden)")
                    .allow_empty_password(false)
                    .interact()
                    .context("Failed to read API key from terminal")?,
            };
            let credential = Credential::new(raw)
                .ok_or_else(|| CoachError::Input("API key is empty".into()))?;

            if skip_check {
                tracing::info!("saving API key without a live check");
            } else {
                eprintln!("{}", ui::dim("Checking the key with Gemini..."));
                let gateway = build_gateway(&config);
                bounded(&config, gateway.validate_credential(&credential))
                    .await
                    .map_err(report)?;
            }

            config.set_credential(&credential)?;
            println!(
                "{} Saved API key {} to {}",
                ui::success("✓"),
                ui::value(credential.masked()),
                config.config_path.display()
            );
            warn_if_env_shadows(&config);
            Ok(())
        }

        KeyCommands::Check => {
            let credential = require_credential(&config)?;
            let gateway = build_gateway(&config);
            bounded(&config, gateway.validate_credential(&credential))
                .await
                .map_err(report)?;

            let source = match config.credential() {
                Some((_, CredentialSource::Env(var))) => format!("${var}"),
                _ => "config file".to_string(),
            };
            println!(
                "{} API key {} ({source}) works",
                ui::success("✓"),
                ui::value(credential.masked())
            );
            Ok(())
        }

        KeyCommands::Clear => {
            config.clear_credential()?;
            println!("{} Removed the stored API key", ui::success("✓"));
            warn_if_env_shadows(&config);
            Ok(())
        }
    }
}

fn warn_if_env_shadows(config: &Config) {
    if let Some((_, CredentialSource::Env(var))) = config.credential() {
        eprintln!(
            "{}",
            ui::yellow(format!(
                "Note: ${var} is set and takes priority over the stored key."
            ))
        );
    } else if CREDENTIAL_ENV_VARS.iter().all(|var| std::env::var(var).is_err())
        && config.api_key.is_none()
    {
        eprintln!(
            "{}",
            ui::dim("No API key is configured. Feedback commands will fail until one is set.")
        );
    }
}
