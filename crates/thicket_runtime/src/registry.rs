use std::sync::{Mutex, OnceLock};

use thicket_check::Location;

use crate::declaration::{TestConfig, TestDeclaration};

/// The process-wide mutable test registry.
///
/// Populated during program initialization via [`TestRegistry::global`] plus
/// [`TestRegistry::add_declaration`], then read-only once
/// [`crate::execute_tests`] starts scheduling.
#[derive(Default)]
pub struct TestRegistry {
    declarations: Vec<TestDeclaration>,
}

impl TestRegistry {
    /// The shared, process-wide instance.
    pub fn global() -> &'static Mutex<TestRegistry> {
        static INSTANCE: OnceLock<Mutex<TestRegistry>> = OnceLock::new();
        INSTANCE.get_or_init(|| Mutex::new(TestRegistry::default()))
    }

    pub fn add_declaration(
        &mut self,
        name: impl Into<String>,
        config: TestConfig,
        function: impl Fn() + Send + Sync + 'static,
        location: Location,
    ) {
        self.declarations.push(TestDeclaration::new(name, config, function, location));
    }

    pub fn declarations(&self) -> &[TestDeclaration] {
        &self.declarations
    }
}
