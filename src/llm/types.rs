use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// User-supplied provider secret.
///
/// Only emptiness is checked locally; whether the provider accepts it is
/// decided by a live round trip.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` when the key is empty after trimming.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short masked form for status output, e.g. `AIza…9xQk`.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    #[serde(alias = "bot", alias = "model")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One outbound generation call.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub system: Option<String>,
    /// Conversation in order, oldest first. The last turn is the one being
    /// answered.
    pub turns: Vec<ChatTurn>,
    pub temperature: f64,
    /// Ask the provider for a JSON-only reply when it supports it.
    pub json_reply: bool,
}

impl ProviderRequest {
    pub fn single(instruction: impl Into<String>, temperature: f64) -> Self {
        Self {
            system: None,
            turns: vec![ChatTurn::user(instruction)],
            temperature,
            json_reply: false,
        }
    }

    /// Replay `turns` as-is; the last one is answered.
    pub fn conversation(turns: Vec<ChatTurn>, temperature: f64) -> Self {
        Self {
            system: None,
            turns,
            temperature,
            json_reply: false,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn expecting_json(mut self) -> Self {
        self.json_reply = true;
        self
    }

    pub fn prompt_chars(&self) -> usize {
        self.system.as_deref().map_or(0, |s| s.chars().count())
            + self
                .turns
                .iter()
                .map(|t| t.content.chars().count())
                .sum::<usize>()
    }
}
