//! Environment sources
//!
//! Resolution never reads `std::env` directly. It goes through an
//! [`EnvSource`], so the same request can be resolved against the live
//! process environment or against a captured snapshot.

mod traits;
mod process;
mod snapshot;

pub use traits::{EnvSource, non_empty};
pub use process::ProcessEnv;
pub use snapshot::EnvSnapshot;
