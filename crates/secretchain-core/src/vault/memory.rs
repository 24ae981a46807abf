//! In-memory vault

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::traits::{VaultClient, VaultClientFactory, VaultError, VaultResult};

/// In-memory vault for tests and local development
///
/// Holds secrets in a map and can be switched into an "unavailable" state to
/// simulate network or auth failures. Every `get_secret` call is counted,
/// which makes it easy to assert that a resolution never touched the vault.
///
/// # Example
///
/// ```
/// use secretchain_core::vault::MemoryVault;
///
/// let vault = MemoryVault::new("memory://local");
/// vault.insert("prod-db-key", "s3cr3t");
/// assert_eq!(vault.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryVault {
    url: String,
    secrets: RwLock<HashMap<String, String>>,
    outage: RwLock<Option<String>>,
    requests: AtomicUsize,
}

impl MemoryVault {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secrets: RwLock::new(HashMap::new()),
            outage: RwLock::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// Create a vault pre-populated with secrets
    pub fn with_secrets(url: impl Into<String>, initial: HashMap<String, String>) -> Self {
        let vault = Self::new(url);
        *vault.secrets.write() = initial;
        vault
    }

    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.secrets.write().insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.secrets.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every lookup fail with `VaultError::Unavailable(reason)`
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        *self.outage.write() = Some(reason.into());
    }

    /// Clear a previous `set_unavailable`
    pub fn set_available(&self) {
        *self.outage.write() = None;
    }

    /// Number of `get_secret` calls made so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VaultClient for MemoryVault {
    fn name(&self) -> &str {
        "memory"
    }

    fn vault_url(&self) -> &str {
        &self.url
    }

    async fn get_secret(&self, name: &str) -> VaultResult<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.outage.read().clone() {
            return Err(VaultError::Unavailable(reason));
        }
        self.secrets
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(name.to_string()))
    }
}

/// Factory handing out a shared `MemoryVault`
///
/// Records every URL it was asked to build a client for. Built with
/// [`MemoryVaultFactory::broken`], it refuses to build clients at all, which
/// stands in for a vault integration that is not installed or misconfigured.
#[derive(Debug)]
pub struct MemoryVaultFactory {
    vault: Arc<MemoryVault>,
    construction_error: Option<String>,
    created_for: Mutex<Vec<String>>,
}

impl MemoryVaultFactory {
    pub fn new(vault: Arc<MemoryVault>) -> Self {
        Self {
            vault,
            construction_error: None,
            created_for: Mutex::new(Vec::new()),
        }
    }

    /// A factory whose `create` always fails
    pub fn broken(reason: impl Into<String>) -> Self {
        Self {
            vault: Arc::new(MemoryVault::new("memory://unavailable")),
            construction_error: Some(reason.into()),
            created_for: Mutex::new(Vec::new()),
        }
    }

    pub fn vault(&self) -> &Arc<MemoryVault> {
        &self.vault
    }

    /// URLs passed to `create`, in call order
    pub fn created_for(&self) -> Vec<String> {
        self.created_for.lock().clone()
    }
}

impl VaultClientFactory for MemoryVaultFactory {
    fn name(&self) -> &str {
        "memory"
    }

    fn create(&self, vault_url: &str) -> VaultResult<Arc<dyn VaultClient>> {
        self.created_for.lock().push(vault_url.to_string());

        match &self.construction_error {
            Some(reason) => Err(VaultError::Unavailable(reason.clone())),
            None => Ok(self.vault.clone()),
        }
    }
}
