use bandcoach::feedback::{EssayTask, StyleMode};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// `bandcoach` - IELTS writing and speaking feedback from the command line.
#[derive(Parser, Debug)]
#[command(name = "bandcoach")]
#[command(version)]
#[command(about = "Band scores and feedback for IELTS practice answers.", long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        key_command: KeyCommands,
    },

    /// Show configuration and credential status
    Status,

    /// Score a Writing Task 1 or Task 2 answer
    Score {
        /// Writing task (1 or 2)
        #[arg(long, value_enum, default_value = "2")]
        task: TaskArg,

        /// The exam question the essay answers
        #[arg(short, long)]
        prompt: String,

        /// Essay text (reads stdin when neither --essay nor --file is given)
        #[arg(long, conflicts_with = "file")]
        essay: Option<String>,

        /// Read the essay from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assess a transcribed speaking answer
    Speaking {
        /// Cue card or interview question
        #[arg(short, long)]
        prompt: String,

        /// Transcript text (reads stdin when neither --transcript nor --file is given)
        #[arg(long, conflicts_with = "file")]
        transcript: Option<String>,

        /// Read the transcript from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Brainstorm arguments for an essay question
    Brainstorm {
        /// The essay question
        #[arg(short, long)]
        prompt: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite text in a different style
    Rewrite {
        #[arg(short, long, value_enum)]
        mode: ModeArg,

        /// Text to rewrite (reads stdin when neither --text nor --file is given)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Correct grammar, punctuation and spelling
    Grammar {
        /// Text to correct (reads stdin when neither --text nor --file is given)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Talk to the IELTS tutor
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Print the reply as JSON (single message mode only)
        #[arg(long, requires = "message")]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Store an API key, checking it with the provider first
    Set {
        /// API key (prompted with hidden input if omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Save without the live check
        #[arg(long)]
        skip_check: bool,
    },

    /// Check the active API key with a live request
    Check,

    /// Remove the stored API key
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<TaskArg> for EssayTask {
    fn from(arg: TaskArg) -> Self {
        match arg {
            TaskArg::One => Self::Task1,
            TaskArg::Two => Self::Task2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Academic,
    Concise,
}

impl From<ModeArg> for StyleMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Academic => Self::Academic,
            ModeArg::Concise => Self::Concise,
        }
    }
}
