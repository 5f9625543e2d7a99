use thicket_check::Location;

use crate::config::{RunConfig, should_schedule};
use crate::declaration::TestDeclaration;
use crate::registry::TestRegistry;

/// A declaration plus its scheduled position. Immutable during execution.
#[derive(Clone)]
pub struct TestInstance {
    pub name: String,
    pub location: Location,
    pub(crate) declaration: TestDeclaration,
}

/// The ordered set of instances [`crate::execute_tests`] will run.
pub struct TestSchedule {
    instances: Vec<TestInstance>,
}

impl TestSchedule {
    /// Filters `registry`'s declarations by enablement and substring
    /// filters from `config`, preserving registration order.
    pub fn create(config: &RunConfig, registry: &TestRegistry) -> Self {
        let instances = registry
            .declarations()
            .iter()
            .filter(|decl| should_schedule(config, &decl.name, decl.config.enabled))
            .map(|decl| TestInstance { name: decl.name.clone(), location: decl.location, declaration: decl.clone() })
            .collect();
        Self { instances }
    }

    pub fn instances(&self) -> &[TestInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::TestConfig;

    fn here() -> Location {
        Location { file: file!(), line: line!() }
    }

    #[test]
    fn schedule_preserves_registration_order_and_applies_filters() {
        let mut registry = TestRegistry::default();
        registry.add_declaration("alpha", TestConfig::default(), || {}, here());
        registry.add_declaration("beta", TestConfig::default(), || {}, here());
        let config = RunConfig { filters: vec!["a".into()], ..RunConfig::default() };
        let schedule = TestSchedule::create(&config, &registry);
        let names: Vec<_> = schedule.instances().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn disabled_declaration_is_skipped_by_default() {
        let mut registry = TestRegistry::default();
        registry.add_declaration("off", TestConfig { enabled: false, seed: 0 }, || {}, here());
        let schedule = TestSchedule::create(&RunConfig::default(), &registry);
        assert!(schedule.instances().is_empty());
    }
}
