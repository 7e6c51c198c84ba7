use super::band::BandScore;
use super::request::{StyleMode, TaskType};
use crate::error::GatewayError;
use serde::{Deserialize, Deserializer, Serialize};

/// Band per Writing criterion. For Task 1 `task_response` holds the Task
/// Achievement band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    #[serde(alias = "taskAchievement")]
    pub task_response: BandScore,
    pub coherence: BandScore,
    pub lexical: BandScore,
    pub grammar: BandScore,
    pub overall: BandScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionFeedback {
    #[serde(alias = "taskAchievement")]
    pub task_response: String,
    pub coherence: String,
    pub lexical: String,
    pub grammar: String,
}

/// A weak sentence from the learner next to a stronger version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub original: String,
    pub improved: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayFeedback {
    pub scores: CriterionScores,
    pub feedback: CriterionFeedback,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comparisons: Vec<Rewrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_essay: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingScores {
    pub fluency: BandScore,
    pub lexical: BandScore,
    pub grammar: BandScore,
    pub pronunciation: BandScore,
    pub overall: BandScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingCriterionFeedback {
    pub fluency: String,
    pub lexical: String,
    pub grammar: String,
    pub pronunciation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingFeedback {
    pub scores: SpeakingScores,
    pub feedback: SpeakingCriterionFeedback,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fillers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comparisons: Vec<Rewrite>,
}

/// Optional lists arrive missing, `null` or populated; the first two are empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Idea list for an essay prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brainstorm {
    pub agree: Vec<String>,
    pub disagree: Vec<String>,
    pub structure: String,
}

/// Result of a [`super::FeedbackRequest`], tagged by the task it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackResponse {
    Writing2(EssayFeedback),
    Writing1(EssayFeedback),
    Speaking(SpeakingFeedback),
    Brainstorm(Brainstorm),
    GrammarFix { text: String },
    StyleTransform { mode: StyleMode, text: String },
    Chat { reply: String },
}

impl FeedbackResponse {
    pub fn task(&self) -> TaskType {
        match self {
            Self::Writing2(_) => TaskType::Writing2,
            Self::Writing1(_) => TaskType::Writing1,
            Self::Speaking(_) => TaskType::Speaking,
            Self::Brainstorm(_) => TaskType::Brainstorm,
            Self::GrammarFix { .. } => TaskType::GrammarFix,
            Self::StyleTransform { mode, .. } => TaskType::StyleTransform(*mode),
            Self::Chat { .. } => TaskType::Chat,
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────────────
//
// Bands are checked during deserialization. What serde cannot express
// (non-blank text, non-empty lists) is checked here.

fn require_text(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::malformed(format!("`{field}` is empty")));
    }
    Ok(())
}

fn require_rewrites(rewrites: &[Rewrite]) -> Result<(), GatewayError> {
    for (i, rewrite) in rewrites.iter().enumerate() {
        require_text(&format!("comparisons[{i}].original"), &rewrite.original)?;
        require_text(&format!("comparisons[{i}].improved"), &rewrite.improved)?;
    }
    Ok(())
}

impl EssayFeedback {
    pub(crate) fn validated(mut self) -> Result<Self, GatewayError> {
        let f = &self.feedback;
        require_text("feedback.taskResponse", &f.task_response)?;
        require_text("feedback.coherence", &f.coherence)?;
        require_text("feedback.lexical", &f.lexical)?;
        require_text("feedback.grammar", &f.grammar)?;
        require_rewrites(&self.comparisons)?;
        if self
            .improved_essay
            .as_deref()
            .is_some_and(|essay| essay.trim().is_empty())
        {
            self.improved_essay = None;
        }
        Ok(self)
    }
}

impl SpeakingFeedback {
    pub(crate) fn validated(mut self) -> Result<Self, GatewayError> {
        let f = &self.feedback;
        require_text("feedback.fluency", &f.fluency)?;
        require_text("feedback.lexical", &f.lexical)?;
        require_text("feedback.grammar", &f.grammar)?;
        require_text("feedback.pronunciation", &f.pronunciation)?;
        require_rewrites(&self.comparisons)?;
        self.fillers.retain(|filler| !filler.trim().is_empty());
        Ok(self)
    }
}

impl Brainstorm {
    pub(crate) fn validated(self) -> Result<Self, GatewayError> {
        if self.agree.is_empty() {
            return Err(GatewayError::malformed("`agree` has no points"));
        }
        if self.disagree.is_empty() {
            return Err(GatewayError::malformed("`disagree` has no points"));
        }
        for (i, point) in self.agree.iter().enumerate() {
            require_text(&format!("agree[{i}]"), point)?;
        }
        for (i, point) in self.disagree.iter().enumerate() {
            require_text(&format!("disagree[{i}]"), point)?;
        }
        require_text("structure", &self.structure)?;
        Ok(self)
    }
}
