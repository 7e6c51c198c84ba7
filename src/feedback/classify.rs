use crate::error::GatewayError;
use crate::llm::{sanitize_api_error, scrub_secret_patterns};

const CREDENTIAL_HINTS: &[&str] = &[
    "api key not valid",
    "api_key_invalid",
    "invalid api key",
    "api key expired",
    "permission_denied",
    "unauthenticated",
    "unauthorized",
    "(401",
    "(403",
];

const QUOTA_HINTS: &[&str] = &[
    "quota",
    "resource_exhausted",
    "rate limit",
    "too many requests",
    "(429",
];

const NETWORK_HINTS: &[&str] = &[
    "fetch failed",
    "error sending request",
    "connection refused",
    "connection reset",
    "dns error",
    "failed to lookup address",
    "timed out",
    "network is unreachable",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Map a raw provider failure onto the learner-facing error set.
pub fn classify_provider_error(err: &anyhow::Error) -> GatewayError {
    if let Some(transport) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<reqwest::Error>())
        && (transport.is_connect() || transport.is_timeout() || transport.is_request())
    {
        return GatewayError::NetworkFailure;
    }

    let message = format!("{err:#}");
    let lower = message.to_lowercase();

    if contains_any(&lower, CREDENTIAL_HINTS) {
        GatewayError::InvalidCredential
    } else if contains_any(&lower, QUOTA_HINTS) {
        GatewayError::QuotaExceeded
    } else if contains_any(&lower, NETWORK_HINTS) {
        GatewayError::NetworkFailure
    } else {
        GatewayError::ProviderFailure(sanitize_api_error(&scrub_secret_patterns(&message)))
    }
}
