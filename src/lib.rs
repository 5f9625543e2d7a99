//! A section-tree test execution engine with an expression-capturing
//! check/assert protocol.
//!

pub use thicket_runtime::*;

/// Ambient structured logging, initialized explicitly by the embedding
/// binary — not turned on implicitly by linking this crate.
#[cfg(feature = "logging")]
pub use thicket_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use thicket_runtime::prelude::*;
}
