//! Tiered secret resolution
//!
//! Checks sources in strict priority order:
//! 1. Direct environment variable holding the literal secret
//! 2. Remote vault, when both the secret-name variable and the vault URL variable are set
//! 3. Caller-supplied fallback

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;

use crate::config::SecretManifest;
use crate::env::{EnvSource, ProcessEnv};
use crate::logging::{Logger, TracingLogger};
use crate::vault::{VaultClient, VaultClientFactory, VaultError};
use crate::{log_debug, log_error, log_info, log_warn};
use super::error::{ResolutionResult, SecretResolutionError};
use super::request::SecretRequest;

/// Default variable naming the vault endpoint
pub const DEFAULT_VAULT_URL_ENV: &str = "VAULT_URL";

/// Which source produced a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Direct environment override
    Environment { var: String },
    /// Vault lookup
    Vault { secret_name: String },
    /// Caller-supplied fallback
    Fallback,
}

impl SecretSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretSource::Environment { .. } => "environment",
            SecretSource::Vault { .. } => "vault",
            SecretSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Environment { var } => write!(f, "environment variable ${}", var),
            SecretSource::Vault { secret_name } => write!(f, "vault secret '{}'", secret_name),
            SecretSource::Fallback => write!(f, "fallback value"),
        }
    }
}

/// Result of resolving a secret
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret value
    pub value: String,
    /// Which source provided the secret
    pub source: SecretSource,
}

impl ResolvedSecret {
    pub fn new(value: impl Into<String>, source: SecretSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Secrets resolved from a manifest, keyed by entry name
#[derive(Debug, Clone, Default)]
pub struct ResolvedSecrets {
    secrets: BTreeMap<String, Option<ResolvedSecret>>,
}

impl ResolvedSecrets {
    /// The resolved secret for `name`, `None` if absent or not in the manifest
    pub fn get(&self, name: &str) -> Option<&ResolvedSecret> {
        self.secrets.get(name).and_then(|s| s.as_ref())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.value())
    }

    /// Whether `name` was part of the manifest, resolved or not
    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ResolvedSecret>)> {
        self.secrets.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// Resolves secrets from environment, vault and fallback
///
/// `resolve` takes `&self` and keeps no mutable state, so one resolver can
/// serve any number of concurrent resolutions.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use secretchain_core::env::EnvSnapshot;
/// use secretchain_core::resolver::{SecretRequest, SecretResolver, SecretSource};
/// use secretchain_core::vault::{MemoryVault, MemoryVaultFactory};
///
/// # futures::executor::block_on(async {
/// let vault = Arc::new(MemoryVault::new("memory://local"));
/// vault.insert("prod-db-key", "s3cr3t");
///
/// let env = EnvSnapshot::from_pairs([
///     ("DB_KEY_SECRET_NAME", "prod-db-key"),
///     ("VAULT_URL", "https://vault.example.com"),
/// ]);
///
/// let resolver = SecretResolver::new()
///     .with_env(Arc::new(env))
///     .with_vault_factory(Arc::new(MemoryVaultFactory::new(vault)));
///
/// let request = SecretRequest::new("DB_KEY", "DB_KEY_SECRET_NAME").required();
/// let secret = resolver.resolve(&request).await.unwrap().unwrap();
/// assert_eq!(secret.value(), "s3cr3t");
/// assert_eq!(secret.source, SecretSource::Vault { secret_name: "prod-db-key".into() });
/// # });
/// ```
#[derive(Clone)]
pub struct SecretResolver {
    env: Arc<dyn EnvSource>,
    vault_factory: Option<Arc<dyn VaultClientFactory>>,
    vault_url_var: String,
    logger: Arc<dyn Logger>,
}

impl SecretResolver {
    /// Resolver reading the process environment, with no vault integration
    pub fn new() -> Self {
        Self {
            env: Arc::new(ProcessEnv::new()),
            vault_factory: None,
            vault_url_var: DEFAULT_VAULT_URL_ENV.to_string(),
            logger: Arc::new(TracingLogger::new()),
        }
    }

    /// Read variables from `env` instead of the process environment
    pub fn with_env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    /// Enable the vault branch
    ///
    /// Without a factory, requests that reach the vault branch are treated
    /// as having no vault integration.
    pub fn with_vault_factory(mut self, factory: Arc<dyn VaultClientFactory>) -> Self {
        self.vault_factory = Some(factory);
        self
    }

    /// Change the variable naming the vault endpoint (default `VAULT_URL`)
    pub fn with_vault_url_var(mut self, var: impl Into<String>) -> Self {
        self.vault_url_var = var.into();
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn vault_url_var(&self) -> &str {
        &self.vault_url_var
    }

    pub fn has_vault_factory(&self) -> bool {
        self.vault_factory.is_some()
    }

    /// Resolve one secret
    ///
    /// Returns `Ok(None)` only for requests that are not required.
    pub async fn resolve(&self, request: &SecretRequest) -> ResolutionResult<Option<ResolvedSecret>> {
        self.resolve_with_vault_var(request, &self.vault_url_var).await
    }

    /// Resolve several secrets concurrently
    ///
    /// Results come back in the order of `requests`. One failure does not
    /// stop the others.
    pub async fn resolve_all(
        &self,
        requests: &[SecretRequest],
    ) -> Vec<ResolutionResult<Option<ResolvedSecret>>> {
        join_all(requests.iter().map(|request| self.resolve(request))).await
    }

    /// Resolve every entry of a manifest concurrently
    ///
    /// Fails with the first error in manifest order, so startup can abort
    /// with a message about the first misconfigured secret.
    pub async fn resolve_manifest(&self, manifest: &SecretManifest) -> ResolutionResult<ResolvedSecrets> {
        let vault_url_var = manifest.vault_url_env().unwrap_or(&self.vault_url_var);
        let requests = manifest.requests();

        let results = join_all(
            requests
                .iter()
                .map(|(_, request)| self.resolve_with_vault_var(request, vault_url_var)),
        )
        .await;

        let mut resolved = ResolvedSecrets::default();
        for ((name, _), result) in requests.iter().zip(results) {
            resolved.secrets.insert(name.to_string(), result?);
        }
        log_info!(
            self.logger,
            "Resolved manifest: {} of {} secrets set",
            resolved.iter().filter(|(_, s)| s.is_some()).count(),
            resolved.len()
        );
        Ok(resolved)
    }

    async fn resolve_with_vault_var(
        &self,
        request: &SecretRequest,
        vault_url_var: &str,
    ) -> ResolutionResult<Option<ResolvedSecret>> {
        let direct_key = request.direct_env_key();

        if let Some(value) = self.env.non_empty_var(direct_key) {
            log_debug!(self.logger, "Resolved {} from environment", direct_key);
            return Ok(Some(ResolvedSecret::new(
                value,
                SecretSource::Environment {
                    var: direct_key.to_string(),
                },
            )));
        }

        if let Some(secret) = self.try_vault(request, vault_url_var).await? {
            return Ok(Some(secret));
        }

        if let Some(fallback) = request.fallback_value().filter(|v| !v.is_empty()) {
            log_debug!(self.logger, "Using fallback value for {}", direct_key);
            return Ok(Some(ResolvedSecret::new(fallback, SecretSource::Fallback)));
        }

        if request.is_required() {
            log_error!(
                self.logger,
                "Required secret missing: neither {} nor {} is set",
                direct_key,
                request.indirect_env_key()
            );
            return Err(SecretResolutionError::MissingRequiredSecret {
                direct_env_key: direct_key.to_string(),
                indirect_env_key: request.indirect_env_key().to_string(),
            });
        }

        log_debug!(self.logger, "No value for {}; leaving it unset", direct_key);
        Ok(None)
    }

    /// Vault branch. `Ok(None)` means "continue with the fallback".
    async fn try_vault(
        &self,
        request: &SecretRequest,
        vault_url_var: &str,
    ) -> ResolutionResult<Option<ResolvedSecret>> {
        let Some(secret_name) = self.env.non_empty_var(request.indirect_env_key()) else {
            return Ok(None);
        };
        let Some(vault_url) = self.env.non_empty_var(vault_url_var) else {
            log_debug!(
                self.logger,
                "{} names vault secret '{}' but {} is not set; skipping vault",
                request.indirect_env_key(),
                secret_name,
                vault_url_var
            );
            return Ok(None);
        };

        let client = match self.vault_client(&vault_url) {
            Ok(client) => client,
            Err(reason) => {
                if request.is_required() {
                    log_error!(self.logger, "Vault integration unavailable for secret '{}': {}", secret_name, reason);
                    return Err(SecretResolutionError::MissingOptionalIntegration { secret_name, reason });
                }
                log_warn!(self.logger, "Vault integration unavailable for secret '{}': {}", secret_name, reason);
                return Ok(None);
            }
        };

        let lookup = client.get_secret(&secret_name).await.and_then(|value| {
            if value.is_empty() {
                Err(VaultError::InvalidResponse(format!("secret '{}' is empty", secret_name)))
            } else {
                Ok(value)
            }
        });

        match lookup {
            Ok(value) => {
                log_info!(self.logger, "Resolved secret '{}' from vault {}", secret_name, client.vault_url());
                Ok(Some(ResolvedSecret::new(value, SecretSource::Vault { secret_name })))
            }
            Err(source) if request.is_required() => {
                log_error!(self.logger, "Vault lookup failed for secret '{}': {}", secret_name, source);
                Err(SecretResolutionError::VaultLookupFailure { secret_name, source })
            }
            Err(source) => {
                log_warn!(self.logger, "Vault lookup failed for secret '{}': {}", secret_name, source);
                Ok(None)
            }
        }
    }

    fn vault_client(&self, vault_url: &str) -> Result<Arc<dyn VaultClient>, String> {
        let factory = self
            .vault_factory
            .as_ref()
            .ok_or_else(|| "no vault client factory configured".to_string())?;

        factory
            .create(vault_url)
            .map_err(|e| format!("{} client could not be built: {}", factory.name(), e))
    }
}

impl Default for SecretResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver")
            .field("env", &self.env.name())
            .field("vault_factory", &self.vault_factory.as_ref().map(|v| v.name()))
            .field("vault_url_var", &self.vault_url_var)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvSnapshot;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};
    use crate::vault::{MemoryVault, MemoryVaultFactory};

    const VAULT_URL: &str = "https://vault.example.com";

    struct Fixture {
        vault: Arc<MemoryVault>,
        factory: Arc<MemoryVaultFactory>,
        logger: Arc<MemoryLogger>,
    }

    impl Fixture {
        fn new() -> Self {
            let vault = Arc::new(MemoryVault::new(VAULT_URL));
            Self {
                factory: Arc::new(MemoryVaultFactory::new(vault.clone())),
                vault,
                logger: Arc::new(MemoryLogger::new()),
            }
        }

        fn resolver(&self, env: EnvSnapshot) -> SecretResolver {
            SecretResolver::new()
                .with_env(Arc::new(env))
                .with_vault_factory(self.factory.clone())
                .with_logger(self.logger.clone())
        }
    }

    fn db_request() -> SecretRequest {
        SecretRequest::new("DB_KEY", "DB_KEY_SECRET_NAME")
    }

    fn vault_env() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("DB_KEY_SECRET_NAME", "prod-db-key"),
            ("VAULT_URL", VAULT_URL),
        ])
    }

    #[tokio::test]
    async fn test_direct_env_wins_over_vault_and_fallback() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "from-vault");
        let resolver = fx.resolver(vault_env().with_var("DB_KEY", "from-env"));

        let secret = resolver
            .resolve(&db_request().with_fallback("fallback").required())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(secret.value(), "from-env");
        assert_eq!(secret.source, SecretSource::Environment { var: "DB_KEY".to_string() });
        // The vault client is never built when the direct value is present
        assert!(fx.factory.created_for().is_empty());
        assert_eq!(fx.vault.request_count(), 0);
    }

    #[tokio::test]
    async fn test_vault_value_returned() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let resolver = fx.resolver(vault_env());

        let secret = resolver
            .resolve(&db_request().with_fallback("localpass"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(secret.value(), "s3cr3t");
        assert_eq!(secret.source, SecretSource::Vault { secret_name: "prod-db-key".to_string() });
        assert_eq!(fx.factory.created_for(), vec![VAULT_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_empty_direct_value_is_absent() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let resolver = fx.resolver(vault_env().with_var("DB_KEY", ""));

        let secret = resolver.resolve(&db_request()).await.unwrap().unwrap();
        assert_eq!(secret.value(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_vault_not_found_falls_back_when_optional() {
        let fx = Fixture::new();
        let resolver = fx.resolver(vault_env());

        let secret = resolver
            .resolve(&db_request().with_fallback("localpass"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(secret.value(), "localpass");
        assert_eq!(secret.source, SecretSource::Fallback);
        assert!(fx.logger.messages(LogLevel::Warn).iter().any(|m| m.contains("Vault lookup failed")));
    }

    #[tokio::test]
    async fn test_vault_failure_is_fatal_when_required() {
        let fx = Fixture::new();
        let resolver = fx.resolver(vault_env());

        let err = resolver
            .resolve(&db_request().with_fallback("localpass").required())
            .await
            .unwrap_err();

        assert!(err.is_vault_failure());
        assert_eq!(err.secret_name(), Some("prod-db-key"));
        assert!(err.to_string().contains("prod-db-key"));
    }

    #[tokio::test]
    async fn test_vault_outage_falls_back_when_optional() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        fx.vault.set_unavailable("connection refused");
        let resolver = fx.resolver(vault_env());

        let secret = resolver
            .resolve(&db_request().with_fallback("localpass"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(secret.value(), "localpass");
        assert_eq!(fx.vault.request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_vault_value_is_a_failure() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "");
        let resolver = fx.resolver(vault_env());

        let err = resolver.resolve(&db_request().required()).await.unwrap_err();
        match err {
            SecretResolutionError::VaultLookupFailure { source, .. } => {
                assert!(matches!(source, VaultError::InvalidResponse(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vault_skipped_without_url() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let resolver = fx.resolver(EnvSnapshot::from_pairs([("DB_KEY_SECRET_NAME", "prod-db-key")]));

        let secret = resolver
            .resolve(&db_request().with_fallback("localpass").required())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(secret.value(), "localpass");
        assert!(fx.factory.created_for().is_empty());
    }

    #[tokio::test]
    async fn test_vault_skipped_without_secret_name() {
        let fx = Fixture::new();
        let resolver = fx.resolver(EnvSnapshot::from_pairs([
            ("DB_KEY_SECRET_NAME", ""),
            ("VAULT_URL", VAULT_URL),
        ]));

        assert!(resolver.resolve(&db_request()).await.unwrap().is_none());
        assert!(fx.factory.created_for().is_empty());
    }

    #[tokio::test]
    async fn test_absent_and_optional_returns_none() {
        let fx = Fixture::new();
        let resolver = fx.resolver(EnvSnapshot::new());

        assert!(resolver.resolve(&db_request()).await.unwrap().is_none());
        assert!(resolver.resolve(&db_request().with_fallback("")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_absent_and_required_fails() {
        let fx = Fixture::new();
        let resolver = fx.resolver(EnvSnapshot::new());

        let err = resolver
            .resolve(&db_request().with_fallback("").required())
            .await
            .unwrap_err();

        match err {
            SecretResolutionError::MissingRequiredSecret { direct_env_key, indirect_env_key } => {
                assert_eq!(direct_env_key, "DB_KEY");
                assert_eq!(indirect_env_key, "DB_KEY_SECRET_NAME");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_factory_optional_continues() {
        let logger = Arc::new(MemoryLogger::new());
        let resolver = SecretResolver::new()
            .with_env(Arc::new(vault_env()))
            .with_logger(logger.clone());

        let secret = resolver
            .resolve(&db_request().with_fallback("localpass"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(secret.value(), "localpass");
        // Reported as a missing integration, not as a failed lookup
        assert!(logger.contains("Vault integration unavailable"));
        assert!(!logger.contains("Vault lookup failed"));
    }

    #[tokio::test]
    async fn test_no_factory_required_fails() {
        let resolver = SecretResolver::new()
            .with_env(Arc::new(vault_env()))
            .with_logger(Arc::new(NoOpLogger::new()));

        let err = resolver.resolve(&db_request().required()).await.unwrap_err();
        assert!(err.is_missing_integration());
        assert_eq!(err.secret_name(), Some("prod-db-key"));
    }

    #[tokio::test]
    async fn test_broken_factory_required_fails() {
        let factory = Arc::new(MemoryVaultFactory::broken("client library missing"));
        let resolver = SecretResolver::new()
            .with_env(Arc::new(vault_env()))
            .with_vault_factory(factory.clone())
            .with_logger(Arc::new(NoOpLogger::new()));

        let err = resolver.resolve(&db_request().required()).await.unwrap_err();
        assert!(err.is_missing_integration());
        assert!(err.to_string().contains("client library missing"));
        assert_eq!(factory.created_for(), vec![VAULT_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_custom_vault_url_var() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let env = EnvSnapshot::from_pairs([
            ("DB_KEY_SECRET_NAME", "prod-db-key"),
            ("KEY_VAULT_URL", VAULT_URL),
        ]);

        let resolver = fx.resolver(env.clone());
        assert!(resolver.resolve(&db_request()).await.unwrap().is_none());

        let resolver = fx.resolver(env).with_vault_url_var("KEY_VAULT_URL");
        assert_eq!(resolver.vault_url_var(), "KEY_VAULT_URL");
        let secret = resolver.resolve(&db_request()).await.unwrap().unwrap();
        assert_eq!(secret.value(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_order() {
        let fx = Fixture::new();
        fx.vault.insert("prod-api-key", "api-from-vault");
        let env = EnvSnapshot::from_pairs([
            ("DB_KEY", "db-from-env"),
            ("API_KEY_SECRET_NAME", "prod-api-key"),
            ("VAULT_URL", VAULT_URL),
        ]);
        let resolver = fx.resolver(env);

        let requests = vec![
            db_request(),
            SecretRequest::new("API_KEY", "API_KEY_SECRET_NAME"),
            SecretRequest::new("SMTP_PASS", "SMTP_PASS_SECRET_NAME").required(),
            SecretRequest::new("CACHE_KEY", "CACHE_KEY_SECRET_NAME"),
        ];
        let results = resolver.resolve_all(&requests).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().value(), "db-from-env");
        assert_eq!(results[1].as_ref().unwrap().as_ref().unwrap().value(), "api-from-vault");
        assert!(results[2].as_ref().unwrap_err().is_missing_secret());
        assert!(results[3].as_ref().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_manifest() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let manifest = SecretManifest::from_yaml_str(
            r#"
vault_url_env: KEY_VAULT_URL
secrets:
  - { name: database, direct_env: DB_KEY, indirect_env: DB_KEY_SECRET_NAME, required: true }
  - { name: smtp, direct_env: SMTP_PASS, indirect_env: SMTP_PASS_SECRET_NAME, fallback: localpass }
  - { name: cache, direct_env: CACHE_KEY, indirect_env: CACHE_KEY_SECRET_NAME }
"#,
        )
        .unwrap();
        let resolver = fx.resolver(EnvSnapshot::from_pairs([
            ("DB_KEY_SECRET_NAME", "prod-db-key"),
            ("KEY_VAULT_URL", VAULT_URL),
        ]));

        let resolved = resolver.resolve_manifest(&manifest).await.unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved.value("database"), Some("s3cr3t"));
        assert_eq!(resolved.get("smtp").unwrap().source, SecretSource::Fallback);
        assert!(resolved.contains("cache"));
        assert_eq!(resolved.value("cache"), None);
        assert!(!resolved.contains("unknown"));
    }

    #[tokio::test]
    async fn test_resolve_manifest_reports_first_failure() {
        let fx = Fixture::new();
        let manifest = SecretManifest::from_yaml_str(
            r#"
secrets:
  - { name: cache, direct_env: CACHE_KEY, indirect_env: CACHE_KEY_SECRET_NAME }
  - { name: database, direct_env: DB_KEY, indirect_env: DB_KEY_SECRET_NAME, required: true }
  - { name: smtp, direct_env: SMTP_PASS, indirect_env: SMTP_PASS_SECRET_NAME, required: true }
"#,
        )
        .unwrap();
        let resolver = fx.resolver(EnvSnapshot::new());

        let err = resolver.resolve_manifest(&manifest).await.unwrap_err();
        assert!(matches!(
            err,
            SecretResolutionError::MissingRequiredSecret { ref direct_env_key, .. } if direct_env_key == "DB_KEY"
        ));
    }

    #[tokio::test]
    async fn test_logs_never_contain_values() {
        let fx = Fixture::new();
        fx.vault.insert("prod-db-key", "s3cr3t");
        let resolver = fx.resolver(vault_env());

        resolver.resolve(&db_request()).await.unwrap();
        resolver
            .resolve(&SecretRequest::new("OTHER", "OTHER_NAME").with_fallback("localpass"))
            .await
            .unwrap();

        assert!(!fx.logger.records().is_empty());
        assert!(!fx.logger.contains("s3cr3t"));
        assert!(!fx.logger.contains("localpass"));
    }

    #[test]
    fn test_resolved_secret_debug_redacts() {
        let secret = ResolvedSecret::new("s3cr3t", SecretSource::Fallback);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("s3cr3t"));
        assert_eq!(secret.clone().into_value(), "s3cr3t");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(
            SecretSource::Environment { var: "DB_KEY".into() }.to_string(),
            "environment variable $DB_KEY"
        );
        assert_eq!(SecretSource::Vault { secret_name: "x".into() }.as_str(), "vault");
        assert_eq!(SecretSource::Fallback.to_string(), "fallback value");
    }

    #[test]
    fn test_default_resolver() {
        let resolver = SecretResolver::default();
        assert_eq!(resolver.vault_url_var(), DEFAULT_VAULT_URL_ENV);
        assert!(!resolver.has_vault_factory());
        assert!(format!("{:?}", resolver).contains("process"));
    }
}
