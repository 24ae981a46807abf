//! Secret request descriptor

/// Describes where to look for one secret
///
/// Immutable once built: the builder methods consume and return `self`.
///
/// # Example
///
/// ```
/// use secretchain_core::resolver::SecretRequest;
///
/// let request = SecretRequest::new("DB_KEY", "DB_KEY_SECRET_NAME")
///     .with_fallback("localpass")
///     .required();
///
/// assert_eq!(request.direct_env_key(), "DB_KEY");
/// assert_eq!(request.fallback_value(), Some("localpass"));
/// assert!(request.is_required());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretRequest {
    direct_env_key: String,
    indirect_env_key: String,
    fallback_value: Option<String>,
    required: bool,
}

impl SecretRequest {
    /// * `direct_env_key` - variable holding the literal secret
    /// * `indirect_env_key` - variable holding the secret's name in the vault
    pub fn new(direct_env_key: impl Into<String>, indirect_env_key: impl Into<String>) -> Self {
        Self {
            direct_env_key: direct_env_key.into(),
            indirect_env_key: indirect_env_key.into(),
            fallback_value: None,
            required: false,
        }
    }

    /// Value used when neither the environment nor the vault yields one
    ///
    /// An empty fallback counts as no fallback.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_value = Some(fallback.into());
        self
    }

    /// Fail resolution instead of returning nothing
    pub fn required(self) -> Self {
        self.with_required(true)
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn direct_env_key(&self) -> &str {
        &self.direct_env_key
    }

    pub fn indirect_env_key(&self) -> &str {
        &self.indirect_env_key
    }

    pub fn fallback_value(&self) -> Option<&str> {
        self.fallback_value.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl std::fmt::Debug for SecretRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRequest")
            .field("direct_env_key", &self.direct_env_key)
            .field("indirect_env_key", &self.indirect_env_key)
            .field("has_fallback", &self.fallback_value.is_some())
            .field("required", &self.required)
            .finish()
    }
}
