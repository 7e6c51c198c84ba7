use super::types::{ChatRole, ChatTurn, Credential, ProviderRequest};
use std::future::Future;
use std::pin::Pin;

/// Render turns as a plain transcript, used for logging and by providers
/// without native multi-turn support.
pub fn turns_to_text(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .filter(|turn| !turn.content.trim().is_empty())
        .map(|turn| {
            let label = match turn.role {
                ChatRole::User => "User:",
                ChatRole::Assistant => "Assistant:",
            };
            format!("{label} {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send one request and return the raw reply text.
    ///
    /// Implementations make exactly one network round trip and never retry.
    fn generate<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    fn generate<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        (**self).generate(credential, request)
    }
}
