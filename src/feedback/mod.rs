//! IELTS feedback: prompt construction, provider calls, reply validation.

pub mod band;
pub mod classify;
pub mod extract;
pub mod gateway;
pub mod prompts;
pub mod request;
pub mod response;

pub use band::{BandScore, BandScoreError};
pub use classify::classify_provider_error;
pub use extract::{extract_json_object, parse_reply, strip_code_fences};
pub use gateway::{DEFAULT_TEMPERATURE, FeedbackGateway};
pub use request::{EssayTask, FeedbackRequest, StyleMode, TaskType, word_count};
pub use response::{
    Brainstorm, CriterionFeedback, CriterionScores, EssayFeedback, FeedbackResponse, Rewrite,
    SpeakingCriterionFeedback, SpeakingFeedback, SpeakingScores,
};
