use crate::ui::style as ui;
use anyhow::Result;
use bandcoach::config::Config;
use bandcoach::error::{ConfigError, GatewayError};
use bandcoach::feedback::FeedbackGateway;
use bandcoach::llm::{Credential, GeminiProvider};
use std::future::Future;
use std::time::Duration;

pub type Gateway = FeedbackGateway<GeminiProvider>;

pub fn build_gateway(config: &Config) -> Gateway {
    let provider = GeminiProvider::with_base_url(&config.provider.base_url, &config.provider.model)
        .with_max_output_tokens(config.provider.max_output_tokens);
    FeedbackGateway::new(provider).with_temperature(config.provider.temperature)
}

pub fn require_credential(config: &Config) -> Result<Credential> {
    config
        .credential()
        .map(|(credential, _)| credential)
        .ok_or_else(|| ConfigError::MissingCredential.into())
}

/// Await one gateway call, giving up after `config.request.timeout_secs`.
pub async fn bounded<T>(
    config: &Config,
    call: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    let limit = Duration::from_secs(config.request.timeout_secs);
    if let Ok(result) = tokio::time::timeout(limit, call).await {
        result
    } else {
        tracing::warn!(timeout_secs = config.request.timeout_secs, "provider call timed out");
        Err(GatewayError::NetworkFailure)
    }
}

/// What the learner can do about a failure, if anything.
pub fn hint(err: &GatewayError) -> Option<&'static str> {
    match err {
        GatewayError::InvalidCredential => Some("Run `bandcoach key set` to store a valid key."),
        GatewayError::QuotaExceeded => {
            Some("Wait for the quota to reset, or use a key from another project.")
        }
        GatewayError::NetworkFailure => Some("Check your connection and try again."),
        GatewayError::MalformedReply { .. } => {
            Some("The model answered in an unexpected format. Submitting again usually works.")
        }
        GatewayError::ProviderFailure(_) => None,
    }
}

/// Print the hint for `err` and hand it back for propagation.
pub fn report(err: GatewayError) -> anyhow::Error {
    if let Some(hint) = hint(&err) {
        eprintln!("{}", ui::yellow(hint));
    }
    err.into()
}
