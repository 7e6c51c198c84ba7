//! At-rest encryption for the stored API key.

use anyhow::{Context, Result, anyhow, ensure};
use chacha20poly1305::{
    ChaCha20Poly1305, KeyInit, Nonce,
    aead::{Aead, OsRng, rand_core::RngCore},
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const KEY_FILE: &str = ".secret_key";
const SEALED_PREFIX: &str = "ENC:";
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Seals config secrets with ChaCha20-Poly1305.
///
/// The key lives in `.secret_key` beside the config file, hex encoded and
/// readable by the owner only. A sealed value is `ENC:` followed by the hex
/// of nonce then ciphertext.
pub struct SecretStore {
    key_file: PathBuf,
    enabled: bool,
}

impl SecretStore {
    pub fn new(dir: &Path, enabled: bool) -> Self {
        Self {
            key_file: dir.join(KEY_FILE),
            enabled,
        }
    }

    #[must_use]
    pub fn is_encrypted(value: &str) -> bool {
        value.starts_with(SEALED_PREFIX)
    }

    pub fn encrypt(&self, secret: &str) -> Result<String> {
        if !self.enabled || secret.is_empty() || Self::is_encrypted(secret) {
            return Ok(secret.to_owned());
        }

        let mut sealed = vec![0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut sealed);
        let body = self
            .cipher()?
            .encrypt(Nonce::from_slice(&sealed), secret.as_bytes())
            .map_err(|_| anyhow!("could not seal the API key"))?;
        sealed.extend(body);
        Ok(format!("{SEALED_PREFIX}{}", hex::encode(sealed)))
    }

    /// Unsealed values are returned unchanged.
    pub fn decrypt(&self, stored: &str) -> Result<String> {
        let Some(encoded) = stored.strip_prefix(SEALED_PREFIX) else {
            return Ok(stored.to_owned());
        };

        let sealed = hex::decode(encoded).context("stored API key is not valid hex")?;
        ensure!(sealed.len() > NONCE_LEN, "stored API key is truncated");
        let (nonce, body) = sealed.split_at(NONCE_LEN);

        let opened = self
            .cipher()?
            .decrypt(Nonce::from_slice(nonce), body)
            .map_err(|_| anyhow!("could not open the stored API key; was {KEY_FILE} replaced?"))?;
        String::from_utf8(opened).context("stored API key is not UTF-8")
    }

    fn cipher(&self) -> Result<ChaCha20Poly1305> {
        let key = Zeroizing::new(self.key()?);
        ChaCha20Poly1305::new_from_slice(key.as_slice()).context("key file holds a key of the wrong size")
    }

    /// Create the key file on first use. Losing the creation race to another
    /// process means reading the key it wrote.
    fn key(&self) -> Result<[u8; KEY_LEN]> {
        match create_key_file(&self.key_file) {
            Ok(key) => {
                tracing::debug!(path = %self.key_file.display(), "created secret key");
                Ok(key)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => self.read_key(),
            Err(err) => Err(err)
                .with_context(|| format!("failed to create {}", self.key_file.display())),
        }
    }

    fn read_key(&self) -> Result<[u8; KEY_LEN]> {
        restrict_to_owner(&self.key_file)?;
        let encoded = Zeroizing::new(
            fs::read_to_string(&self.key_file)
                .with_context(|| format!("failed to read {}", self.key_file.display()))?,
        );
        let mut key = [0u8; KEY_LEN];
        hex::decode_to_slice(encoded.trim(), &mut key).with_context(|| {
            format!(
                "{} does not hold a {KEY_LEN}-byte hex key",
                self.key_file.display()
            )
        })?;
        Ok(key)
    }
}

fn create_key_file(path: &Path) -> io::Result<[u8; KEY_LEN]> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
    let mut file = options.open(path)?;

    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    let encoded = Zeroizing::new(hex::encode(key));
    file.write_all(encoded.as_bytes())?;
    file.sync_all()?;
    Ok(key)
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .permissions()
        .mode();
    if mode & 0o077 != 0 {
        tracing::warn!(path = %path.display(), "secret key was readable by others; resetting to 0600");
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict {}", path.display()))?;
    }
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}
