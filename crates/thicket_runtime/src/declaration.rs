use std::sync::Arc;

use thicket_check::Location;

/// Per-declaration configuration.
#[derive(Debug, Clone, Copy)]
pub struct TestConfig {
    /// Whether `TestSchedule::create` includes this declaration by default.
    pub enabled: bool,
    /// Reserved for traversal seeding; the core does not randomize
    /// traversal (see spec Non-goals), so this is currently unused by the
    /// scheduler and exists for forward compatibility with collaborators
    /// that read it.
    pub seed: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self { enabled: true, seed: 0 }
    }
}

/// A registered test: a name, its configuration, the no-argument callable
/// that runs it, and the source location of the declaration.
#[derive(Clone)]
pub struct TestDeclaration {
    pub name: String,
    pub config: TestConfig,
    pub function: Arc<dyn Fn() + Send + Sync>,
    pub location: Location,
}

impl TestDeclaration {
    pub fn new(
        name: impl Into<String>,
        config: TestConfig,
        function: impl Fn() + Send + Sync + 'static,
        location: Location,
    ) -> Self {
        Self { name: name.into(), config, function: Arc::new(function), location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Location {
        Location { file: file!(), line: line!() }
    }

    #[test]
    fn default_config_is_enabled() {
        assert!(TestConfig::default().enabled);
    }

    #[test]
    fn declaration_carries_its_callable() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counted = calls.clone();
        let decl = TestDeclaration::new("t", TestConfig::default(), move || {
            counted.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }, here());
        (decl.function)();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
