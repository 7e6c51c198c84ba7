use super::Config;
use crate::error::ConfigError;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let temperature = self.provider.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Validation(format!(
                "provider.temperature must be between 0.0 and 2.0 (got {temperature})"
            )));
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "provider.model must not be empty".into(),
            ));
        }

        let base_url = self.provider.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "provider.base_url must be an http(s) URL (got {base_url:?})"
            )));
        }

        if self.provider.max_output_tokens == 0 {
            return Err(ConfigError::Validation(
                "provider.max_output_tokens must be greater than 0".into(),
            ));
        }

        if self.request.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request.timeout_secs must be greater than 0".into(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {} (got {:?})",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        Ok(())
    }
}
