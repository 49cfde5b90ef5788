//! Credential-signing key registration.

use thiserror::Error;

use crate::config::SecretsConfig;

/// Error type for key registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("{0} secret is empty")]
    Empty(&'static str),
}

/// Signing keys for access and refresh tokens.
///
/// Built once during startup and shared read-only afterwards.
#[derive(Clone)]
pub struct TokenKeys {
    access: Vec<u8>,
    refresh: Vec<u8>,
}

impl TokenKeys {
    /// Register the two secrets from configuration.
    pub fn from_secrets(secrets: &SecretsConfig) -> Result<Self, KeyError> {
        if secrets.jwt_access_secret.is_empty() {
            return Err(KeyError::Empty("access"));
        }
        if secrets.jwt_refresh_secret.is_empty() {
            return Err(KeyError::Empty("refresh"));
        }

        Ok(Self {
            access: secrets.jwt_access_secret.as_bytes().to_vec(),
            refresh: secrets.jwt_refresh_secret.as_bytes().to_vec(),
        })
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("access_len", &self.access.len())
            .field("refresh_len", &self.refresh.len())
            .finish()
    }
}
