//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>` so embedders can route messages
//! wherever they like. The default forwards to `tracing`.

mod traits;
mod noop;
mod tracing_logger;
mod memory;

pub use traits::{Logger, SharedLogger, LogLevel};
pub use noop::NoOpLogger;
pub use tracing_logger::TracingLogger;
pub use memory::{MemoryLogger, LogRecord};
