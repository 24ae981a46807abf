//! Secret manifest file (YAML)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolver::SecretRequest;
use super::error::{ConfigError, ConfigResult};

/// File name of the manifest inside the `secretchain` config directory
pub const MANIFEST_FILE_NAME: &str = "secrets.yaml";

/// Where a manifest was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestLevel {
    /// `~/.config/secretchain/secrets.yaml`
    User,
    /// `.config/secretchain/secrets.yaml` in the workspace root
    Workspace,
}

impl ManifestLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestLevel::User => "user",
            ManifestLevel::Workspace => "workspace",
        }
    }
}

/// One secret to resolve
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretEntry {
    /// Name the application uses to look the secret up after resolution
    pub name: String,
    /// Variable holding the literal secret
    pub direct_env: String,
    /// Variable holding the vault secret name
    pub indirect_env: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl SecretEntry {
    pub fn to_request(&self) -> SecretRequest {
        let request = SecretRequest::new(&self.direct_env, &self.indirect_env)
            .with_required(self.required);
        match &self.fallback {
            Some(fallback) => request.with_fallback(fallback),
            None => request,
        }
    }
}

impl std::fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretEntry")
            .field("name", &self.name)
            .field("direct_env", &self.direct_env)
            .field("indirect_env", &self.indirect_env)
            .field("has_fallback", &self.fallback.is_some())
            .field("required", &self.required)
            .finish()
    }
}

/// Manifest file structure
///
/// ```yaml
/// vault_url_env: VAULT_URL
/// secrets:
///   - name: database
///     direct_env: DB_KEY
///     indirect_env: DB_KEY_SECRET_NAME
///     fallback: localpass
///     required: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SecretManifest {
    /// Overrides the variable naming the vault endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_url_env: Option<String>,

    #[serde(default)]
    pub secrets: Vec<SecretEntry>,
}

impl SecretManifest {
    /// Parse and validate a manifest
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let manifest: SecretManifest = serde_yaml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest from a file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load the workspace manifest if present, else the user manifest
    ///
    /// Returns `Ok(None)` when neither exists.
    pub fn discover(workspace_root: Option<&Path>) -> ConfigResult<Option<(ManifestLevel, Self)>> {
        Self::discover_with_user_path(workspace_root, Self::user_path())
    }

    fn discover_with_user_path(
        workspace_root: Option<&Path>,
        user_path: PathBuf,
    ) -> ConfigResult<Option<(ManifestLevel, Self)>> {
        let mut candidates = Vec::new();
        if let Some(root) = workspace_root {
            candidates.push((ManifestLevel::Workspace, Self::workspace_path(root)));
        }
        candidates.push((ManifestLevel::User, user_path));

        for (level, path) in candidates {
            if path.exists() {
                return Ok(Some((level, Self::load(&path)?)));
            }
        }
        Ok(None)
    }

    /// Serialize back to YAML
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// `<config dir>/secretchain/secrets.yaml`
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("secretchain").join(MANIFEST_FILE_NAME)
    }

    /// `<root>/.config/secretchain/secrets.yaml`
    pub fn workspace_path(workspace_root: impl AsRef<Path>) -> PathBuf {
        workspace_root
            .as_ref()
            .join(".config")
            .join("secretchain")
            .join(MANIFEST_FILE_NAME)
    }

    /// Check names are unique and every entry names its variables
    pub fn validate(&self) -> ConfigResult<()> {
        if matches!(&self.vault_url_env, Some(var) if var.trim().is_empty()) {
            return Err(ConfigError::Invalid("vault_url_env must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for (index, entry) in self.secrets.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("secrets[{}]: name must not be empty", index)));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate secret name '{}'", entry.name)));
            }
            if entry.direct_env.trim().is_empty() || entry.indirect_env.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "secret '{}': direct_env and indirect_env must not be empty",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    pub fn vault_url_env(&self) -> Option<&str> {
        self.vault_url_env.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&SecretEntry> {
        self.secrets.iter().find(|e| e.name == name)
    }

    /// Requests for every entry, in file order
    pub fn requests(&self) -> Vec<(&str, SecretRequest)> {
        self.secrets
            .iter()
            .map(|e| (e.name.as_str(), e.to_request()))
            .collect()
    }
}
