use crate::llm::ChatTurn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IELTS Writing sub-task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EssayTask {
    /// Report on a chart, table, map or process.
    Task1,
    /// Argumentative essay.
    Task2,
}

impl EssayTask {
    /// Recommended minimum length on the exam.
    pub fn recommended_words(self) -> usize {
        match self {
            Self::Task1 => 150,
            Self::Task2 => 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleMode {
    Academic,
    Concise,
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Academic => "academic",
            Self::Concise => "concise",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "mode")]
pub enum TaskType {
    Writing2,
    Writing1,
    Speaking,
    Brainstorm,
    GrammarFix,
    StyleTransform(StyleMode),
    Chat,
}

impl TaskType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Writing2 => "writing task 2",
            Self::Writing1 => "writing task 1",
            Self::Speaking => "speaking",
            Self::Brainstorm => "brainstorm",
            Self::GrammarFix => "grammar fix",
            Self::StyleTransform(_) => "style transform",
            Self::Chat => "chat",
        }
    }
}

impl From<EssayTask> for TaskType {
    fn from(task: EssayTask) -> Self {
        match task {
            EssayTask::Task1 => Self::Writing1,
            EssayTask::Task2 => Self::Writing2,
        }
    }
}

/// A single learner action (submit essay, stop recording, ask the tutor).
///
/// `prompt_text` is the exam question where one applies; `user_content` is
/// what the learner produced. `history` is only read for [`TaskType::Chat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub task: TaskType,
    #[serde(default)]
    pub prompt_text: String,
    #[serde(default)]
    pub user_content: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl FeedbackRequest {
    pub fn essay(task: EssayTask, prompt: impl Into<String>, essay: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            prompt_text: prompt.into(),
            user_content: essay.into(),
            history: Vec::new(),
        }
    }

    pub fn speaking(prompt: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            task: TaskType::Speaking,
            prompt_text: prompt.into(),
            user_content: transcript.into(),
            history: Vec::new(),
        }
    }

    pub fn brainstorm(prompt: impl Into<String>) -> Self {
        Self {
            task: TaskType::Brainstorm,
            prompt_text: prompt.into(),
            user_content: String::new(),
            history: Vec::new(),
        }
    }

    pub fn grammar_fix(text: impl Into<String>) -> Self {
        Self {
            task: TaskType::GrammarFix,
            prompt_text: String::new(),
            user_content: text.into(),
            history: Vec::new(),
        }
    }

    pub fn style_transform(mode: StyleMode, text: impl Into<String>) -> Self {
        Self {
            task: TaskType::StyleTransform(mode),
            prompt_text: String::new(),
            user_content: text.into(),
            history: Vec::new(),
        }
    }

    pub fn chat(history: Vec<ChatTurn>, message: impl Into<String>) -> Self {
        Self {
            task: TaskType::Chat,
            prompt_text: String::new(),
            user_content: message.into(),
            history,
        }
    }
}

/// Whitespace-separated word count, as shown next to the essay editor.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
