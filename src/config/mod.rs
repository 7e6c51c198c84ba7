mod crypto;
mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
pub(crate) mod test_env;
mod validate;

pub use env_overrides::{CREDENTIAL_ENV_VARS, CredentialSource};
pub use schema::{Config, LoggingConfig, ProviderConfig, RequestConfig, SecretsConfig};
