use thicket_check::Location;
use thicket_section::SectionReport;

/// One scheduled instance's finished result.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub instance_name: String,
    pub declaration_location: Location,
    pub root: SectionReport,
}

/// The outcome of one [`crate::execute_tests`] call.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub test_results: Vec<TestResult>,
    pub count_total_tests: u64,
    pub count_failed_tests: u64,
    pub count_total_checks: u64,
    pub count_failed_checks: u64,
}

impl SuiteResult {
    pub(crate) fn from_test_results(test_results: Vec<TestResult>) -> Self {
        let count_total_tests = test_results.len() as u64;
        let count_failed_tests = test_results.iter().filter(|r| r.root.is_considered_failing).count() as u64;
        let count_total_checks = test_results.iter().map(|r| r.root.executed_checks).sum();
        let count_failed_checks = test_results.iter().map(|r| r.root.failed_checks).sum();
        Self { test_results, count_total_tests, count_failed_tests, count_total_checks, count_failed_checks }
    }

    /// Zero when every test passed, suitable for a CLI driver's process
    /// exit status.
    pub fn exit_code(&self) -> i32 {
        if self.count_failed_tests == 0 { 0 } else { 1 }
    }
}
