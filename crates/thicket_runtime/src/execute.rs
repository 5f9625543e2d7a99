use thicket_check::HardAssertGuard;
use thicket_section::run_test;

use crate::config::RunConfig;
use crate::schedule::TestSchedule;
use crate::suite_result::{SuiteResult, TestResult};

/// Runs every scheduled instance, installing one process-wide
/// [`HardAssertGuard`] for the duration of the whole suite — the panic-hook
/// interception slot is process-wide, so it is acquired once here rather
/// than per test.
pub fn execute_tests(schedule: &TestSchedule, _config: &RunConfig) -> SuiteResult {
    let _guard = HardAssertGuard::install();

    let test_results = schedule
        .instances()
        .iter()
        .map(|instance| {
            let span = tracing::info_span!("test", name = %instance.name);
            let _entered = span.enter();
            tracing::info!("starting");

            let function = instance.declaration.function.clone();
            let root = run_test(instance.name.clone(), instance.location, move || (function)());

            if root.is_considered_failing {
                tracing::warn!(errors = root.errors.len(), "test failed");
            } else {
                tracing::info!(checks = root.executed_checks, "test passed");
            }

            TestResult { instance_name: instance.name.clone(), declaration_location: instance.location, root }
        })
        .collect();

    SuiteResult::from_test_results(test_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::TestConfig;
    use crate::registry::TestRegistry;
    use thicket_check::Location;
    use thicket_macros::{CHECK, REQUIRE, SECTION};

    fn here() -> Location {
        Location { file: file!(), line: line!() }
    }

    #[test]
    fn arithmetic_asserts_all_pass() {
        let mut registry = TestRegistry::default();
        registry.add_declaration(
            "arithmetic",
            TestConfig::default(),
            || {
                CHECK!(true);
                CHECK!(1 < 2);
                CHECK!(1 + 2 == 3);
                CHECK!(1 + 2 != 4);
                CHECK!(1 + 3 > 2);
                CHECK!(1 + 1 >= 2);
            },
            here(),
        );
        let schedule = TestSchedule::create(&RunConfig::default(), &registry);
        let suite = execute_tests(&schedule, &RunConfig::default());
        assert_eq!(suite.count_total_tests, 1);
        assert_eq!(suite.count_total_checks, 6);
        assert_eq!(suite.count_failed_tests, 0);
        assert_eq!(suite.count_failed_checks, 0);
    }

    #[test]
    fn require_failure_fails_its_test_without_blocking_the_suite() {
        let mut registry = TestRegistry::default();
        registry.add_declaration(
            "fatal",
            TestConfig::default(),
            || {
                SECTION!("fatal", {
                    REQUIRE!(1 == 2);
                    CHECK!(true); // unreachable
                });
                SECTION!("ok", {
                    CHECK!(true);
                });
            },
            here(),
        );
        registry.add_declaration("trailing", TestConfig::default(), || { CHECK!(true); }, here());
        let schedule = TestSchedule::create(&RunConfig::default(), &registry);
        let suite = execute_tests(&schedule, &RunConfig::default());
        assert_eq!(suite.count_total_tests, 2);
        assert_eq!(suite.count_failed_tests, 1);
    }

    #[test]
    fn typed_failure_is_isolated_to_its_own_test() {
        let mut registry = TestRegistry::default();
        registry.add_declaration(
            "throws",
            TestConfig::default(),
            || {
                thicket_check::TestFailure::raise("test exception");
            },
            here(),
        );
        registry.add_declaration("after", TestConfig::default(), || { CHECK!(true); }, here());
        let schedule = TestSchedule::create(&RunConfig::default(), &registry);
        let suite = execute_tests(&schedule, &RunConfig::default());
        assert_eq!(suite.count_total_tests, 2);
        assert_eq!(suite.count_failed_tests, 1);
        let failing = &suite.test_results[0];
        assert!(failing.root.errors.iter().any(|e| e.expanded == "uncaught exception: test exception"));
    }
}
