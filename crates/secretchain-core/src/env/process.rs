//! Live process environment

use std::env;

use super::traits::EnvSource;

/// Environment source backed by `std::env`
///
/// Variables whose value is not valid UTF-8 are reported as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn var(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        env::var(key).ok()
    }
}
