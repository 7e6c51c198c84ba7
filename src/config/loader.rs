use super::Config;
use super::schema::{CONFIG_DIR, CONFIG_FILE};
use crate::llm::Credential;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.bandcoach/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_at(&home.join(CONFIG_DIR))
    }

    /// Same as [`Config::load_or_init`] rooted at `dir` instead of the home
    /// directory.
    pub fn load_or_init_at(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        if config_path.exists() {
            let (mut config, secrets_need_persist) = Self::read_file(&config_path)?;
            if secrets_need_persist {
                tracing::info!(path = %config_path.display(), "encrypting stored API key");
                config.save()?;
            }

            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            tracing::debug!(path = %config_path.display(), "created default config");
            Ok(config)
        }
    }

    /// Parse and decrypt the file at `config_path`. The flag is `true` when a
    /// plaintext key should be rewritten encrypted.
    fn read_file(config_path: &Path) -> Result<(Self, bool)> {
        let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_path = config_path.to_path_buf();
        let secrets_need_persist = config.decrypt_config_secrets_in_place()?;
        Ok((config, secrets_need_persist))
    }

    pub fn save(&self) -> Result<()> {
        let persisted = self.config_for_persistence()?;
        let toml_str = toml::to_string_pretty(&persisted).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Store `credential` in the config file.
    pub fn set_credential(&mut self, credential: &Credential) -> Result<()> {
        self.persist_api_key(Some(credential.expose().to_string()))
    }

    /// Remove the stored credential. Environment variables are untouched.
    pub fn clear_credential(&mut self) -> Result<()> {
        self.persist_api_key(None)
    }

    // `self` may carry environment overrides; only the key is written back
    // over what is on disk.
    fn persist_api_key(&mut self, api_key: Option<String>) -> Result<()> {
        let mut stored = if self.config_path.exists() {
            Self::read_file(&self.config_path)?.0
        } else {
            Self {
                config_path: self.config_path.clone(),
                ..Self::default()
            }
        };
        stored.api_key.clone_from(&api_key);
        stored.save()?;
        self.api_key = api_key;
        Ok(())
    }
}
