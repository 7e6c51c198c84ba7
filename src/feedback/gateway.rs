use super::classify::classify_provider_error;
use super::extract::parse_reply;
use super::prompts;
use super::request::{EssayTask, FeedbackRequest, StyleMode, TaskType};
use super::response::{Brainstorm, EssayFeedback, FeedbackResponse, SpeakingFeedback};
use crate::error::GatewayError;
use crate::llm::{ChatTurn, Credential, Provider, ProviderRequest, turns_to_text};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Turns learner actions into provider calls and provider replies into typed
/// feedback.
///
/// Holds no per-learner state: the credential and any chat history arrive
/// with each call, and every operation makes exactly one provider request.
/// Timeouts are the caller's concern.
pub struct FeedbackGateway<P> {
    provider: P,
    temperature: f64,
}

impl<P: Provider> FeedbackGateway<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Score a Writing Task 1 or Task 2 response on the four criteria.
    pub async fn submit_essay_for_scoring(
        &self,
        credential: &Credential,
        essay: &str,
        prompt: &str,
        task: EssayTask,
    ) -> Result<EssayFeedback, GatewayError> {
        let instruction = prompts::essay_scoring(task, prompt, essay);
        let request = ProviderRequest::single(instruction, self.temperature).expecting_json();
        let reply = self.call(TaskType::from(task), credential, &request).await?;
        Self::structured(TaskType::from(task), &reply, EssayFeedback::validated)
    }

    /// Score a speaking answer from its transcript.
    pub async fn assess_speaking(
        &self,
        credential: &Credential,
        transcript: &str,
        prompt: &str,
    ) -> Result<SpeakingFeedback, GatewayError> {
        let instruction = prompts::speaking_assessment(prompt, transcript);
        let request = ProviderRequest::single(instruction, self.temperature).expecting_json();
        let reply = self.call(TaskType::Speaking, credential, &request).await?;
        Self::structured(TaskType::Speaking, &reply, SpeakingFeedback::validated)
    }

    pub async fn request_brainstorm(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<Brainstorm, GatewayError> {
        let request =
            ProviderRequest::single(prompts::brainstorm(prompt), self.temperature).expecting_json();
        let reply = self.call(TaskType::Brainstorm, credential, &request).await?;
        Self::structured(TaskType::Brainstorm, &reply, Brainstorm::validated)
    }

    pub async fn transform_style(
        &self,
        credential: &Credential,
        text: &str,
        mode: StyleMode,
    ) -> Result<String, GatewayError> {
        let task = TaskType::StyleTransform(mode);
        let request =
            ProviderRequest::single(prompts::style_transform(mode, text), self.temperature);
        let reply = self.call(task, credential, &request).await?;
        Self::plain(task, reply)
    }

    pub async fn repair_grammar(
        &self,
        credential: &Credential,
        text: &str,
    ) -> Result<String, GatewayError> {
        let request = ProviderRequest::single(prompts::grammar_repair(text), self.temperature);
        let reply = self.call(TaskType::GrammarFix, credential, &request).await?;
        Self::plain(TaskType::GrammarFix, reply)
    }

    /// Answer `message` in the context of `history` (oldest turn first).
    pub async fn chat(
        &self,
        credential: &Credential,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, GatewayError> {
        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.extend_from_slice(history);
        turns.push(ChatTurn::user(message));

        let request = ProviderRequest::conversation(turns, self.temperature)
            .with_system(prompts::TUTOR_SYSTEM);
        let reply = self.call(TaskType::Chat, credential, &request).await?;
        Self::plain(TaskType::Chat, reply)
    }

    /// Live round trip with a minimal prompt. Any reply counts as success.
    pub async fn validate_credential(&self, credential: &Credential) -> Result<(), GatewayError> {
        let request = ProviderRequest::single(prompts::CREDENTIAL_CHECK, 0.0);
        match self.provider.generate(credential, &request).await {
            Ok(_) => {
                tracing::info!(provider = self.provider.name(), "credential accepted");
                Ok(())
            }
            Err(err) => {
                let classified = classify_provider_error(&err);
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %classified,
                    "credential check failed"
                );
                Err(classified)
            }
        }
    }

    /// Run whichever operation `request.task` names.
    pub async fn submit(
        &self,
        credential: &Credential,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, GatewayError> {
        let prompt = request.prompt_text.as_str();
        let content = request.user_content.as_str();

        Ok(match request.task {
            TaskType::Writing2 => FeedbackResponse::Writing2(
                self.submit_essay_for_scoring(credential, content, prompt, EssayTask::Task2)
                    .await?,
            ),
            TaskType::Writing1 => FeedbackResponse::Writing1(
                self.submit_essay_for_scoring(credential, content, prompt, EssayTask::Task1)
                    .await?,
            ),
            TaskType::Speaking => {
                FeedbackResponse::Speaking(self.assess_speaking(credential, content, prompt).await?)
            }
            TaskType::Brainstorm => {
                FeedbackResponse::Brainstorm(self.request_brainstorm(credential, prompt).await?)
            }
            TaskType::GrammarFix => FeedbackResponse::GrammarFix {
                text: self.repair_grammar(credential, content).await?,
            },
            TaskType::StyleTransform(mode) => FeedbackResponse::StyleTransform {
                mode,
                text: self.transform_style(credential, content, mode).await?,
            },
            TaskType::Chat => FeedbackResponse::Chat {
                reply: self.chat(credential, &request.history, content).await?,
            },
        })
    }

    async fn call(
        &self,
        task: TaskType,
        credential: &Credential,
        request: &ProviderRequest,
    ) -> Result<String, GatewayError> {
        tracing::debug!(
            task = task.label(),
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_chars = request.prompt_chars(),
            turns = request.turns.len(),
            "sending feedback request"
        );
        tracing::trace!(transcript = %turns_to_text(&request.turns), "request turns");

        match self.provider.generate(credential, request).await {
            Ok(reply) => {
                tracing::debug!(task = task.label(), reply_chars = reply.len(), "provider replied");
                Ok(reply)
            }
            Err(err) => {
                let classified = classify_provider_error(&err);
                tracing::warn!(task = task.label(), error = %classified, "provider call failed");
                Err(classified)
            }
        }
    }

    fn structured<T: serde::de::DeserializeOwned>(
        task: TaskType,
        reply: &str,
        validate: fn(T) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        parse_reply::<T>(reply).and_then(validate).inspect_err(|err| {
            tracing::warn!(task = task.label(), error = %err, "rejected provider reply");
        })
    }

    fn plain(task: TaskType, reply: String) -> Result<String, GatewayError> {
        let trimmed = reply.trim();
        if trimmed.is_empty() {
            tracing::warn!(task = task.label(), "provider returned empty text");
            return Err(GatewayError::malformed("reply is empty"));
        }
        Ok(trimmed.to_string())
    }
}
