//! Remote secret vault boundary
//!
//! The resolver only depends on three capabilities:
//! - `VaultClientFactory`: builds a client for a vault URL, lazily
//! - `VaultClient`: fetches a secret by name
//! - `CredentialProvider`: supplies the ambient credential a client authenticates with
//!
//! Built-in implementations: `HttpVaultClient` for a key-value secret REST API,
//! and `MemoryVault` for tests and local development.

mod traits;
mod credential;
mod http_client;
mod memory;

pub use traits::{
    Credential, CredentialProvider, VaultClient, VaultClientFactory, VaultError, VaultResult,
    validate_secret_name,
};
pub use credential::{EnvTokenCredential, StaticCredential, DEFAULT_TOKEN_ENV};
pub use http_client::{HttpVaultClient, HttpVaultClientFactory, HttpVaultConfig, DEFAULT_TIMEOUT};
pub use memory::{MemoryVault, MemoryVaultFactory};
