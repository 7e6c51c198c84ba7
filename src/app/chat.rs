use super::runner::{bounded, build_gateway, hint, require_credential};
use crate::ui::style as ui;
use anyhow::{Context, Result};
use bandcoach::config::Config;
use bandcoach::llm::ChatTurn;
use dialoguer::Input;

/// Interactive tutor session. History lives only for the session; a turn is
/// recorded only once the tutor has answered it.
pub async fn run_repl(config: &Config) -> Result<()> {
    let credential = require_credential(config)?;
    let gateway = build_gateway(config);
    let mut history: Vec<ChatTurn> = Vec::new();

    println!();
    println!("  {} {}", ui::accent("◆"), ui::header("IELTS tutor"));
    println!(
        "  {}",
        ui::dim("Ask anything about the exam. /reset starts over, /quit leaves.")
    );
    println!();

    loop {
        let line: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read from terminal")?;
        let message = line.trim();

        match message {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                history.clear();
                println!("{}", ui::dim("(conversation cleared)"));
                continue;
            }
            _ => {}
        }

        match bounded(config, gateway.chat(&credential, &history, message)).await {
            Ok(reply) => {
                println!("{} {reply}\n", ui::accent("tutor"));
                history.push(ChatTurn::user(message));
                history.push(ChatTurn::assistant(reply));
            }
            Err(err) => {
                eprintln!("{} {err}", ui::error("error:"));
                if let Some(hint) = hint(&err) {
                    eprintln!("{}", ui::yellow(hint));
                }
            }
        }
    }

    tracing::debug!(turns = history.len(), "chat session ended");
    Ok(())
}
