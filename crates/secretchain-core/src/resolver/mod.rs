//! Secret resolution
//!
//! A single entry point that turns a `SecretRequest` into a value, trying
//! the environment, a vault and a fallback in strict priority order.

mod request;
mod error;
mod secret_resolver;

pub use request::SecretRequest;
pub use error::{SecretResolutionError, ResolutionResult};
pub use secret_resolver::{
    SecretResolver, ResolvedSecret, ResolvedSecrets, SecretSource, DEFAULT_VAULT_URL_ENV,
};
