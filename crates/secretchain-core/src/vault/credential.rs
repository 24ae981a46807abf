//! Built-in credential providers

use std::sync::Arc;

use async_trait::async_trait;

use crate::env::{EnvSource, ProcessEnv};
use super::traits::{Credential, CredentialProvider, VaultError, VaultResult};

/// Default variable read by `EnvTokenCredential`
pub const DEFAULT_TOKEN_ENV: &str = "VAULT_TOKEN";

/// A fixed credential, for tests or tokens obtained by the caller
#[derive(Debug, Clone)]
pub struct StaticCredential {
    credential: Credential,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredential {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_credential(&self) -> VaultResult<Credential> {
        Ok(self.credential.clone())
    }
}

/// Reads a bearer token from an environment variable at request time
pub struct EnvTokenCredential {
    env: Arc<dyn EnvSource>,
    var: String,
}

impl EnvTokenCredential {
    /// Read `VAULT_TOKEN` from the process environment
    pub fn new() -> Self {
        Self::with_env(Arc::new(ProcessEnv::new()), DEFAULT_TOKEN_ENV)
    }

    pub fn with_env(env: Arc<dyn EnvSource>, var: impl Into<String>) -> Self {
        Self {
            env,
            var: var.into(),
        }
    }

    /// Name of the variable holding the token
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvTokenCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvTokenCredential")
            .field("env", &self.env.name())
            .field("var", &self.var)
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for EnvTokenCredential {
    fn name(&self) -> &str {
        "env-token"
    }

    async fn get_credential(&self) -> VaultResult<Credential> {
        self.env
            .non_empty_var(&self.var)
            .map(Credential::new)
            .ok_or_else(|| VaultError::Credential(format!("{} is not set", self.var)))
    }
}
