// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Provider implementations ────────────────────────────────────────────────
pub mod gemini;

// ── Infrastructure re-exports ───────────────────────────────────────────────
pub use http_client::build_provider_client;
pub use scrub::{sanitize_api_error, scrub_credential, scrub_secret_patterns};
pub use traits::{Provider, turns_to_text};
pub use types::{ChatRole, ChatTurn, Credential, ProviderRequest};

// ── Provider re-exports ─────────────────────────────────────────────────────
pub use gemini::GeminiProvider;
