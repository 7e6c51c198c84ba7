use crate::app::chat::run_repl;
use crate::app::input::read_text;
use crate::app::keys::handle_key_command;
use crate::app::render::render_response;
use crate::app::runner::{bounded, build_gateway, report, require_credential};
use crate::app::status::render_status;
use crate::cli::commands::{Cli, Commands};
use crate::ui::style as ui;
use anyhow::{Context, Result};
use bandcoach::config::Config;
use bandcoach::error::CoachError;
use bandcoach::feedback::{EssayTask, FeedbackRequest, FeedbackResponse, StyleMode, word_count};

/// Below this the scorer has too little to judge.
const MIN_ESSAY_WORDS: usize = 50;
const MIN_REWRITE_CHARS: usize = 20;

fn input_error(message: impl Into<String>) -> anyhow::Error {
    CoachError::Input(message.into()).into()
}

fn require_non_blank(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(input_error(format!("{what} must not be empty")));
    }
    Ok(())
}

fn check_essay(task: EssayTask, prompt: &str, essay: &str) -> Result<()> {
    require_non_blank(prompt, "the essay prompt")?;
    let words = word_count(essay);
    if words < MIN_ESSAY_WORDS {
        return Err(input_error(format!(
            "the essay has {words} words; at least {MIN_ESSAY_WORDS} are needed for a meaningful score"
        )));
    }
    let recommended = task.recommended_words();
    if words < recommended {
        eprintln!(
            "{}",
            ui::yellow(format!(
                "Warning: {words} words is under the {recommended} expected on the exam; \
                 short answers lose marks for task fulfilment."
            ))
        );
    }
    Ok(())
}

fn check_rewrite(text: &str) -> Result<()> {
    if text.trim().chars().count() < MIN_REWRITE_CHARS {
        return Err(input_error(format!(
            "text to rewrite must be at least {MIN_REWRITE_CHARS} characters"
        )));
    }
    Ok(())
}

async fn run_feedback(config: &Config, request: FeedbackRequest, json: bool) -> Result<()> {
    let credential = require_credential(config)?;
    let gateway = build_gateway(config);

    if !json {
        eprintln!("{}", ui::dim(format!("Asking Gemini for {}...", request.task.label())));
    }
    let response = bounded(config, gateway.submit(&credential, &request))
        .await
        .map_err(report)?;

    print_response(&response, json)
}

fn print_response(response: &FeedbackResponse, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(response).context("Failed to serialize response")?;
        println!("{rendered}");
    } else {
        println!("{}", render_response(response));
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Key { key_command } => handle_key_command(key_command, config).await,

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }

        Commands::Score {
            task,
            prompt,
            essay,
            file,
            json,
        } => {
            let task = EssayTask::from(task);
            let essay = read_text(essay, file.as_deref(), "essay")?;
            check_essay(task, &prompt, &essay)?;
            run_feedback(&config, FeedbackRequest::essay(task, prompt, essay), json).await
        }

        Commands::Speaking {
            prompt,
            transcript,
            file,
            json,
        } => {
            let transcript = read_text(transcript, file.as_deref(), "transcript")?;
            require_non_blank(&prompt, "the speaking question")?;
            require_non_blank(&transcript, "the transcript")?;
            run_feedback(&config, FeedbackRequest::speaking(prompt, transcript), json).await
        }

        Commands::Brainstorm { prompt, json } => {
            require_non_blank(&prompt, "the essay prompt")?;
            run_feedback(&config, FeedbackRequest::brainstorm(prompt), json).await
        }

        Commands::Rewrite {
            mode,
            text,
            file,
            json,
        } => {
            let text = read_text(text, file.as_deref(), "text")?;
            check_rewrite(&text)?;
            let request = FeedbackRequest::style_transform(StyleMode::from(mode), text);
            run_feedback(&config, request, json).await
        }

        Commands::Grammar { text, file, json } => {
            let text = read_text(text, file.as_deref(), "text")?;
            require_non_blank(&text, "the text")?;
            run_feedback(&config, FeedbackRequest::grammar_fix(text), json).await
        }

        Commands::Chat { message, json } => match message {
            Some(message) => {
                require_non_blank(&message, "the message")?;
                run_feedback(&config, FeedbackRequest::chat(Vec::new(), message), json).await
            }
            None => run_repl(&config).await,
        },
    }
}
