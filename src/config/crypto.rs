use super::Config;
use crate::security::SecretStore;
use anyhow::Result;
use std::path::Path;

/// Decrypt in place. Returns `true` when the file still holds a plaintext
/// secret that should be rewritten encrypted.
fn decrypt_secret_option(
    value: &mut Option<String>,
    store: &SecretStore,
    encrypt_enabled: bool,
) -> Result<bool> {
    let Some(current) = value.as_deref() else {
        return Ok(false);
    };

    let trimmed = current.trim();
    if trimmed.is_empty() {
        *value = None;
        return Ok(false);
    }

    let needs_encrypt_persist = encrypt_enabled && !SecretStore::is_encrypted(trimmed);
    *value = Some(store.decrypt(trimmed)?);
    Ok(needs_encrypt_persist)
}

fn encrypt_secret_option(value: &mut Option<String>, store: &SecretStore) -> Result<()> {
    let Some(current) = value.as_deref() else {
        return Ok(());
    };

    let trimmed = current.trim();
    if trimmed.is_empty() {
        *value = None;
        return Ok(());
    }
    if SecretStore::is_encrypted(trimmed) {
        return Ok(());
    }

    *value = Some(store.encrypt(trimmed)?);
    Ok(())
}

impl Config {
    fn secret_store_root(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn secret_store(&self) -> SecretStore {
        SecretStore::new(self.secret_store_root(), self.secrets.encrypt)
    }

    pub(super) fn decrypt_config_secrets_in_place(&mut self) -> Result<bool> {
        let store = self.secret_store();
        decrypt_secret_option(&mut self.api_key, &store, self.secrets.encrypt)
    }

    pub(super) fn config_for_persistence(&self) -> Result<Self> {
        let mut persisted = self.clone();
        if self.secrets.encrypt {
            encrypt_secret_option(&mut persisted.api_key, &self.secret_store())?;
        }
        Ok(persisted)
    }
}
