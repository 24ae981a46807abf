//! Resolution errors

use thiserror::Error;

use crate::vault::VaultError;

/// Why a required secret could not be resolved
///
/// Only required requests produce these. For optional requests the same
/// conditions are logged and resolution moves on to the next source.
#[derive(Error, Debug)]
pub enum SecretResolutionError {
    /// The vault was addressed but no client could be built for it
    #[error("Vault integration unavailable for secret '{secret_name}': {reason}")]
    MissingOptionalIntegration { secret_name: String, reason: String },

    /// The vault was reached but the lookup failed
    #[error("Failed to fetch secret '{secret_name}' from vault: {source}")]
    VaultLookupFailure {
        secret_name: String,
        #[source]
        source: VaultError,
    },

    /// No source produced a value
    #[error("Missing required secret: set {direct_env_key}, or set {indirect_env_key} to a vault secret name")]
    MissingRequiredSecret {
        direct_env_key: String,
        indirect_env_key: String,
    },
}

impl SecretResolutionError {
    /// The vault secret name involved, if the failure happened at the vault
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            Self::MissingOptionalIntegration { secret_name, .. }
            | Self::VaultLookupFailure { secret_name, .. } => Some(secret_name),
            Self::MissingRequiredSecret { .. } => None,
        }
    }

    pub fn is_missing_integration(&self) -> bool {
        matches!(self, Self::MissingOptionalIntegration { .. })
    }

    pub fn is_vault_failure(&self) -> bool {
        matches!(self, Self::VaultLookupFailure { .. })
    }

    pub fn is_missing_secret(&self) -> bool {
        matches!(self, Self::MissingRequiredSecret { .. })
    }
}

pub type ResolutionResult<T> = Result<T, SecretResolutionError>;
