use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `bandcoach`.
///
/// Library callers match on [`GatewayError`] to decide what to show the
/// learner; the provider and config plumbing keeps using `anyhow::Result`
/// for context chains and is classified at the gateway boundary.
#[derive(Debug, Error)]
pub enum CoachError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Feedback gateway ────────────────────────────────────────────────
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    // ── Caller-side input checks ────────────────────────────────────────
    #[error("input: {0}")]
    Input(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no provider credential configured (run `bandcoach key set` or export GEMINI_API_KEY)")]
    MissingCredential,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Gateway errors ─────────────────────────────────────────────────────────

/// Every way a feedback request can fail.
///
/// All variants are recoverable: the learner is shown the message and may
/// submit again. `MalformedReply` means the provider answered but the answer
/// could not be turned into a complete, valid result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("the provider rejected the API key")]
    InvalidCredential,

    #[error("the API key has exhausted its provider quota")]
    QuotaExceeded,

    #[error("could not reach the provider; check your connection")]
    NetworkFailure,

    #[error("the provider reply was not usable: {reason}")]
    MalformedReply { reason: String },

    #[error("provider failure: {0}")]
    ProviderFailure(String),
}

impl GatewayError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedReply {
            reason: reason.into(),
        }
    }
}
