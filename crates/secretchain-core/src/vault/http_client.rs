//! HTTP vault client
//!
//! Talks to a key-value secret store over its REST API:
//!
//! ```text
//! GET {vault_url}/secrets/{name}[?api-version={version}]
//! Authorization: Bearer <token>
//!
//! 200 {"value": "...", ...}
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::log_debug;
use crate::logging::{Logger, TracingLogger};
use super::traits::{
    validate_secret_name, CredentialProvider, VaultClient, VaultClientFactory, VaultError,
    VaultResult,
};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body kept in `VaultError::Api`
const MAX_ERROR_BODY_CHARS: usize = 512;

// Shared so that clients built per resolution reuse one connection pool.
static SHARED_HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Options for `HttpVaultClient`
#[derive(Debug, Clone)]
pub struct HttpVaultConfig {
    /// Value of the `api-version` query parameter, if the vault expects one
    pub api_version: Option<String>,
    /// Timeout applied to each request
    pub timeout: Duration,
}

impl Default for HttpVaultConfig {
    fn default() -> Self {
        Self {
            api_version: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpVaultConfig {
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct SecretBundle {
    value: Option<String>,
}

/// Vault client speaking JSON over HTTP(S)
pub struct HttpVaultClient {
    vault_url: String,
    base: Url,
    credentials: Arc<dyn CredentialProvider>,
    config: HttpVaultConfig,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl HttpVaultClient {
    /// Create a client with default options
    pub fn new(vault_url: &str, credentials: Arc<dyn CredentialProvider>) -> VaultResult<Self> {
        Self::with_config(vault_url, credentials, HttpVaultConfig::default())
    }

    pub fn with_config(
        vault_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        config: HttpVaultConfig,
    ) -> VaultResult<Self> {
        Ok(Self {
            vault_url: vault_url.to_string(),
            base: parse_vault_url(vault_url)?,
            credentials,
            config,
            http: SHARED_HTTP.clone(),
            logger: Arc::new(TracingLogger::new()),
        })
    }

    /// Use a specific `reqwest::Client` (proxy settings, TLS roots, ...)
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &HttpVaultConfig {
        &self.config
    }

    /// Build the request URL for a secret
    pub fn secret_url(&self, name: &str) -> VaultResult<Url> {
        validate_secret_name(name)?;

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| VaultError::InvalidUrl {
                url: self.vault_url.clone(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("secrets")
            .push(name);

        if let Some(version) = &self.config.api_version {
            url.query_pairs_mut().append_pair("api-version", version);
        }
        Ok(url)
    }
}

#[async_trait]
impl VaultClient for HttpVaultClient {
    fn name(&self) -> &str {
        "http"
    }

    fn vault_url(&self) -> &str {
        &self.vault_url
    }

    async fn get_secret(&self, name: &str) -> VaultResult<String> {
        let url = self.secret_url(name)?;
        let credential = self.credentials.get_credential().await?;
        if credential.is_expired() {
            return Err(VaultError::Credential(format!(
                "credential from {} has expired",
                self.credentials.name()
            )));
        }

        log_debug!(self.logger, "Fetching secret '{}' from vault {}", name, self.vault_url);

        let response = self
            .http
            .get(url)
            .bearer_auth(credential.token())
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(VaultError::NotFound(name.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(VaultError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VaultError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bundle: SecretBundle = response
            .json()
            .await
            .map_err(|e| VaultError::InvalidResponse(e.to_string()))?;

        match bundle.value {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(VaultError::InvalidResponse(format!(
                "secret '{}' has no value",
                name
            ))),
        }
    }
}

impl std::fmt::Debug for HttpVaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVaultClient")
            .field("vault_url", &self.vault_url)
            .field("credentials", &self.credentials.name())
            .field("config", &self.config)
            .finish()
    }
}

fn parse_vault_url(vault_url: &str) -> VaultResult<Url> {
    let invalid = |reason: String| VaultError::InvalidUrl {
        url: vault_url.to_string(),
        reason,
    };

    let mut url = Url::parse(vault_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Factory producing `HttpVaultClient`s that share one credential provider
pub struct HttpVaultClientFactory {
    credentials: Arc<dyn CredentialProvider>,
    config: HttpVaultConfig,
    http: Option<reqwest::Client>,
    logger: Arc<dyn Logger>,
}

impl HttpVaultClientFactory {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            config: HttpVaultConfig::default(),
            http: None,
            logger: Arc::new(TracingLogger::new()),
        }
    }

    pub fn with_config(mut self, config: HttpVaultConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Logger handed to every client this factory builds
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }
}

impl VaultClientFactory for HttpVaultClientFactory {
    fn name(&self) -> &str {
        "http"
    }

    fn create(&self, vault_url: &str) -> VaultResult<Arc<dyn VaultClient>> {
        let mut client =
            HttpVaultClient::with_config(vault_url, self.credentials.clone(), self.config.clone())?
                .with_logger(self.logger.clone());
        if let Some(http) = &self.http {
            client = client.with_http_client(http.clone());
        }
        Ok(Arc::new(client))
    }
}
