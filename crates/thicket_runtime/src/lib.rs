//! Registry, schedule, and execution entry point for thicket.
//!
//! This crate wires the lower layers together: declarations accumulate in a
//! process-wide [`TestRegistry`], a [`RunConfig`] filters them into a
//! [`TestSchedule`], and [`execute_tests`] drives that schedule through
//! [`thicket_section::run_test`], collecting a [`SuiteResult`].

mod config;
mod declaration;
mod execute;
mod registry;
mod schedule;
mod suite_result;

pub use config::RunConfig;
pub use declaration::{TestConfig, TestDeclaration};
pub use execute::execute_tests;
pub use registry::TestRegistry;
pub use schedule::{TestInstance, TestSchedule};
pub use suite_result::{SuiteResult, TestResult};

pub use thicket_macros::{CHECK, FAIL, REQUIRE, SECTION, SUCCEED};

pub mod prelude {
    pub use crate::{CHECK, FAIL, REQUIRE, SECTION, SUCCEED};
    pub use thicket_check::prelude::*;
    pub use thicket_section::prelude::*;
}
