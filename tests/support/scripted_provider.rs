#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use bandcoach::llm::{Credential, Provider, ProviderRequest};

/// In-memory provider that plays back scripted replies in order and records
/// every request it receives.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    credentials: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            credentials: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new([Ok(reply.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new([Err(message.to_string())])
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub fn credentials_seen(&self) -> Vec<String> {
        self.credentials.lock().expect("credentials lock").clone()
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    fn generate<'a>(
        &'a self,
        credential: &'a Credential,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.credentials
            .lock()
            .expect("credentials lock")
            .push(credential.expose().to_string());

        let next = self.script.lock().expect("script lock").pop_front();
        Box::pin(async move {
            match next {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => Err(anyhow::anyhow!("scripted provider has no more replies")),
            }
        })
    }
}

pub fn credential() -> Credential {
    Credential::new("AIzaSyIntegrationTestKey").expect("test credential is non-empty")
}

/// An essay of exactly `words` whitespace-separated words.
pub fn essay_of(words: usize) -> String {
    const SENTENCE: [&str; 10] = [
        "Many", "people", "believe", "that", "public", "transport", "should", "be", "free,",
        "because",
    ];
    (0..words)
        .map(|i| SENTENCE[i % SENTENCE.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn essay_reply(overall: f64) -> String {
    serde_json::json!({
        "scores": {
            "taskResponse": 7.5,
            "coherence": 7,
            "lexical": 8,
            "grammar": 7.5,
            "overall": overall
        },
        "feedback": {
            "taskResponse": "Your position is clear and well supported.",
            "coherence": "Paragraphs are logically sequenced.",
            "lexical": "Good range with some less common items.",
            "grammar": "A mix of complex structures with few errors."
        },
        "comparisons": [
            { "original": "Free transport is good.", "improved": "Fare-free transit offers substantial civic benefits." },
            { "original": "It costs a lot.", "improved": "It imposes a considerable fiscal burden." }
        ]
    })
    .to_string()
}
