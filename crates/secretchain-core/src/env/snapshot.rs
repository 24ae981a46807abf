//! Captured environment snapshot

use std::collections::HashMap;
use std::env;

use super::traits::EnvSource;

/// An immutable map of environment variables
///
/// Either captured from the process once at startup, so that every request
/// resolved afterwards sees the same environment, or built by hand in tests.
///
/// # Example
///
/// ```
/// use secretchain_core::env::{EnvSnapshot, EnvSource};
///
/// let env = EnvSnapshot::from_pairs([("DB_KEY", "s3cr3t")]);
/// assert_eq!(env.var("DB_KEY"), Some("s3cr3t".to_string()));
/// assert_eq!(env.var("MISSING"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables that are not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        Self {
            vars: env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Build a snapshot from key/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Return a copy with one more variable set
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for EnvSnapshot {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl From<HashMap<String, String>> for EnvSnapshot {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}
