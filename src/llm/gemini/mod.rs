//! Google Gemini provider.
//!
//! Speaks the `generateContent` REST endpoint. The credential is supplied per
//! call and sent in the `x-goog-api-key` header, never in the URL.

use crate::llm::{
    build_provider_client, sanitize_api_error, scrub_credential,
    traits::Provider,
    types::{ChatRole, Credential, ProviderRequest},
};
use anyhow::Context;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiProvider {
    pub fn new(model: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, model)
    }

    /// Point the provider at a different host (proxies, test servers).
    pub fn with_base_url(base_url: &str, model: &str) -> Self {
        let model = model.trim();
        Self {
            client: build_provider_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: if model.is_empty() {
                DEFAULT_MODEL.to_string()
            } else {
                model.to_string()
            },
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens.max(1);
        self
    }

    fn model_path(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            self.model_path()
        )
    }

    fn build_request(request: &ProviderRequest, max_output_tokens: u32) -> GenerateContentRequest {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content {
                role: Some(match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                }),
                parts: vec![Part {
                    text: turn.content.clone(),
                }],
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: request.system.as_ref().map(|system| Content {
                role: None,
                parts: vec![Part {
                    text: system.clone(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens,
                response_mime_type: request.json_reply.then_some("application/json"),
            },
        }
    }

    async fn call_api(
        &self,
        credential: &Credential,
        body: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", credential.expose())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%status, bytes = text.len(), "gemini responded");

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .map_or_else(|_| text.clone(), |envelope| envelope.error.describe());
            let detail = sanitize_api_error(&scrub_credential(&detail, credential.expose()));
            anyhow::bail!("Gemini API error ({status}): {detail}");
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).context("Gemini returned an unreadable response body")?;

        if let Some(err) = parsed.error.as_ref() {
            let detail = scrub_credential(&err.describe(), credential.expose()).into_owned();
            anyhow::bail!("Gemini API error: {}", sanitize_api_error(&detail));
        }

        Ok(parsed)
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            anyhow::bail!("Gemini blocked the prompt ({reason})");
        }

        let Some(candidate) = result.candidates.first() else {
            anyhow::bail!("No response from Gemini");
        };

        let text = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            match candidate.finish_reason.as_deref() {
                Some(reason) if reason != "STOP" => {
                    anyhow::bail!("Gemini returned no text (finish reason {reason})")
                }
                _ => anyhow::bail!("No response from Gemini"),
            }
        }

        Ok(text)
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn generate<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let body = Self::build_request(request, self.max_output_tokens);
            let result = self.call_api(credential, &body).await?;
            if let Some(usage) = result.usage_metadata.as_ref() {
                tracing::debug!(
                    model = result.model_version.as_deref().unwrap_or(&self.model),
                    prompt_tokens = usage.prompt_token_count,
                    reply_tokens = usage.candidates_token_count,
                    "gemini usage"
                );
            }
            Self::extract_text(&result)
        })
    }
}
