//! Secret manifest configuration
//!
//! A YAML file listing the secrets a process resolves at startup.
//! Looked up at workspace level (`.config/secretchain/secrets.yaml`) or
//! user level (`~/.config/secretchain/secrets.yaml`).

mod error;
mod manifest;

pub use error::{ConfigError, ConfigResult};
pub use manifest::{SecretEntry, SecretManifest, ManifestLevel, MANIFEST_FILE_NAME};
