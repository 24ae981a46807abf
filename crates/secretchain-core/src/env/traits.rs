//! Environment source trait

/// Read-only view of a set of environment variables
///
/// Implementations:
/// - `ProcessEnv`: the live process environment
/// - `EnvSnapshot`: a captured or hand-built map
pub trait EnvSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Get a variable's value, `None` if it is unset
    fn var(&self, key: &str) -> Option<String>;

    /// Get a variable's value, treating the empty string as unset
    fn non_empty_var(&self, key: &str) -> Option<String> {
        non_empty(self.var(key))
    }
}

/// Drop empty strings, which never count as a configured value
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
