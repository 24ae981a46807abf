//! `tracing`-backed logger

use super::traits::Logger;

/// Forwards messages to `tracing` events
///
/// Events carry the target `secretchain` plus a `component` field, so a
/// subscriber can filter with e.g. `RUST_LOG=secretchain=debug`.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::with_component("secretchain")
    }

    pub fn with_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "secretchain", component = %self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "secretchain", component = %self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "secretchain", component = %self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "secretchain", component = %self.component, "{}", message);
    }
}
