//! Section tree, scheduler loop, and result finalization for thicket.
//!
//! Built on top of [`thicket_check`]'s execution context: this crate owns
//! the tree of discovered sections, the repeat-until-explored scheduler
//! loop that drives a test's user-supplied body, and the recursive
//! aggregation that turns a finished tree into a [`SectionReport`].

mod active;
mod opener;
mod result;
mod scheduler;
mod section;

pub use opener::SectionOpener;
pub use result::SectionReport;
pub use scheduler::run_test;

/// Enters (or re-enters, on a later run) a named section.
///
/// Called by the `SECTION!` macro; not meant to be written by hand.
#[doc(hidden)]
pub fn enter_section(name: impl Into<String>, location: thicket_check::Location) -> SectionOpener {
    opener::enter_section(name, location)
}

pub mod prelude {
    pub use crate::{SectionReport, run_test};
}
