//! Core traits and types for vault access

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a vault
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Secret not found in vault: {0}")]
    NotFound(String),

    #[error("Vault rejected the credential (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Vault API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from vault: {0}")]
    InvalidResponse(String),

    #[error("Invalid secret name: {0:?}")]
    InvalidSecretName(String),

    #[error("Invalid vault URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Credential unavailable: {0}")]
    Credential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vault not available: {0}")]
    Unavailable(String),
}

impl VaultError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound(_))
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

/// An ambient credential used to authenticate against the vault
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<SystemTime>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: SystemTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// Whether the credential is expired at `now`
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(SystemTime::now())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of ambient credentials (cloud identity, token file, env var, ...)
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Obtain a credential valid for a vault request
    async fn get_credential(&self) -> VaultResult<Credential>;
}

/// A client for one vault
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// Human-readable name of this client type
    fn name(&self) -> &str;

    /// The vault endpoint this client talks to
    fn vault_url(&self) -> &str;

    /// Fetch a secret's value by name
    ///
    /// A single attempt; callers that want retries wrap this.
    async fn get_secret(&self, name: &str) -> VaultResult<String>;
}

/// Builds vault clients on demand
///
/// Construction happens only when a resolution actually reaches the vault,
/// so environments without vault access never build a client.
pub trait VaultClientFactory: Send + Sync {
    /// Human-readable name of this factory
    fn name(&self) -> &str;

    /// Build a client for `vault_url`
    fn create(&self, vault_url: &str) -> VaultResult<Arc<dyn VaultClient>>;
}

/// Check that a secret name is safe to place in a URL path segment
///
/// Allowed: ASCII alphanumerics, `-`, `_` and `.`, excluding `.` and `..`.
pub fn validate_secret_name(name: &str) -> VaultResult<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(VaultError::InvalidSecretName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_credential_debug_redacts_token() {
        let credential = Credential::new("super-secret-token");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_credential_expiry() {
        let now = SystemTime::now();
        let credential = Credential::new("t").with_expiry(now);
        assert!(credential.is_expired_at(now));
        assert!(!credential.is_expired_at(now - Duration::from_secs(1)));
        assert!(!Credential::new("t").is_expired());
    }

    #[test]
    fn test_validate_secret_name() {
        assert!(validate_secret_name("prod-db-key").is_ok());
        assert!(validate_secret_name("app_v2.token").is_ok());

        for bad in ["", ".", "..", "a/b", "with space", "q?x=1", "ключ"] {
            assert!(
                matches!(validate_secret_name(bad), Err(VaultError::InvalidSecretName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = VaultError::NotFound("prod-db-key".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Secret not found in vault: prod-db-key");

        let err = VaultError::Api { status: 500, message: "boom".to_string() };
        assert_eq!(err.to_string(), "Vault API error (500): boom");
        assert!(!err.is_not_found());
    }
}
