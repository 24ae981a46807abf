//! secretchain core
//!
//! Resolves named secrets at process startup through a fixed precedence chain:
//! a direct environment override, then a remote vault addressed by an
//! indirection variable, then a caller-supplied fallback.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use secretchain_core::{SecretRequest, SecretResolver};
//! use secretchain_core::vault::{EnvTokenCredential, HttpVaultClientFactory};
//!
//! let resolver = SecretResolver::new()
//!     .with_vault_factory(Arc::new(HttpVaultClientFactory::new(Arc::new(EnvTokenCredential::new()))));
//!
//! // DB_KEY wins; otherwise DB_KEY_SECRET_NAME is looked up in the vault at $VAULT_URL
//! let request = SecretRequest::new("DB_KEY", "DB_KEY_SECRET_NAME").required();
//! let db_key = resolver.resolve(&request).await?.expect("required secrets are never absent");
//! ```

pub mod env;
pub mod vault;
pub mod resolver;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use env::{EnvSource, EnvSnapshot, ProcessEnv};

pub use vault::{
    VaultClient, VaultClientFactory, VaultError, VaultResult,
    Credential, CredentialProvider, StaticCredential, EnvTokenCredential,
    HttpVaultClient, HttpVaultClientFactory, HttpVaultConfig,
    MemoryVault, MemoryVaultFactory,
};

pub use resolver::{
    SecretResolver, SecretRequest, ResolvedSecret, ResolvedSecrets, SecretSource,
    SecretResolutionError, ResolutionResult,
};

pub use config::{SecretManifest, SecretEntry, ConfigError, ConfigResult};

pub use logging::{Logger, NoOpLogger, TracingLogger};
