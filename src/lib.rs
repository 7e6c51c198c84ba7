#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! IELTS practice feedback backed by a generative model.
//!
//! [`feedback::FeedbackGateway`] turns a learner's essay, transcript or
//! question into one provider call and validates the reply into typed
//! results. [`llm`] holds the provider seam and the Gemini client;
//! [`config`] persists settings and the encrypted credential.

pub mod config;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod security;

pub use config::Config;
pub use error::{CoachError, ConfigError, GatewayError};
pub use feedback::{FeedbackGateway, FeedbackRequest, FeedbackResponse};
