//! Configuration errors

use std::path::PathBuf;

/// Errors that can occur while loading a secret manifest
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
