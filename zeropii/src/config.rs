//! Loading the encryption key from process configuration.
//!
//! The engine itself takes the key as a plain argument on every call. This
//! module is the one place that reads it from the environment, for binaries
//! and services that want the usual `ENCRYPTION_KEY` setup.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{cipher::Cipher, error::ConfigError};

/// Environment variable read by [`VaultConfig::from_env`].
pub const ENCRYPTION_KEY_VAR: &str = "ENCRYPTION_KEY";

/// The process-wide key, held as a secret so it never reaches `Debug` output.
#[derive(Clone, Deserialize)]
pub struct VaultConfig {
    encryption_key: SecretString,
}

impl VaultConfig {
    /// Wraps an already loaded key after checking that it is usable.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            encryption_key: SecretString::new(key.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads `.env` when present, then reads [`ENCRYPTION_KEY_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_var(ENCRYPTION_KEY_VAR)
    }

    /// Reads the key from `name` without touching `.env`.
    pub fn from_env_var(name: &str) -> Result<Self, ConfigError> {
        let key = std::env::var(name).map_err(|_| ConfigError::MissingKey(name.to_string()))?;
        Self::new(key)
    }

    /// Checks that the key is accepted by the cipher.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Cipher::new(self.expose_key()).map_err(ConfigError::InvalidKey)?;
        Ok(())
    }

    /// The raw key, for passing to the engine.
    pub fn expose_key(&self) -> &str {
        self.encryption_key.expose_secret()
    }
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("encryption_key", &"[REDACTED]")
            .finish()
    }
}
