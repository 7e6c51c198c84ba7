use super::Config;
use crate::llm::Credential;

/// Environment variables checked for a credential, in priority order.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["BANDCOACH_API_KEY", "GEMINI_API_KEY"];

/// Where the active credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Env(&'static str),
    ConfigFile,
}

impl Config {
    /// Apply non-secret overrides. Credentials from the environment are
    /// resolved by [`Config::credential`] so they never end up on disk.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("BANDCOACH_MODEL")
            && !model.trim().is_empty()
        {
            self.provider.model = model.trim().to_string();
        }

        if let Ok(base_url) = std::env::var("BANDCOACH_BASE_URL")
            && !base_url.trim().is_empty()
        {
            self.provider.base_url = base_url.trim().to_string();
        }

        if let Ok(timeout_str) = std::env::var("BANDCOACH_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.trim().parse::<u64>()
            && timeout > 0
        {
            self.request.timeout_secs = timeout;
        }

        if let Ok(level) = std::env::var("BANDCOACH_LOG")
            && !level.trim().is_empty()
        {
            self.logging.level = level.trim().to_ascii_lowercase();
        }
    }

    /// Active credential: environment first, then the config file.
    pub fn credential(&self) -> Option<(Credential, CredentialSource)> {
        for var in CREDENTIAL_ENV_VARS {
            if let Some(credential) = std::env::var(var).ok().and_then(Credential::new) {
                return Some((credential, CredentialSource::Env(var)));
            }
        }

        self.api_key
            .as_deref()
            .and_then(Credential::new)
            .map(|credential| (credential, CredentialSource::ConfigFile))
    }
}
