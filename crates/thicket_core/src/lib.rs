//! Ambient logging and build metadata for thicket.
//!
//! The lowest-layer crate that the rest of the workspace reaches for when it
//! needs structured logging or version metadata, rather than rolling its
//! own.

mod build_info;
pub mod logging;

pub use build_info::BuildInfo;
