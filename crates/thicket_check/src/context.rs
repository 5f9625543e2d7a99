//! Per-test thread-local execution state (component C of the runtime).
//!
//! A context is pushed when a test starts and popped when it ends. Only the
//! top frame on the stack receives check publications, which lets a nested
//! self-test run its own isolated block of check activity without disturbing
//! the outer test that invoked it.

use std::cell::RefCell;

use crate::{CheckKind, CheckRecord, SectionId, TestError, Unwind};

/// The mutable state belonging to a single in-flight test.
pub struct ExecutionContext {
    root: SectionId,
    path: Vec<SectionId>,
    exec_count: u64,
    leaf_section: Option<SectionId>,
    executed_checks: u64,
    failed_checks: u64,
    errors: Vec<TestError>,
}

impl ExecutionContext {
    fn new(root: SectionId) -> Self {
        Self {
            root,
            path: vec![root],
            exec_count: 0,
            leaf_section: None,
            executed_checks: 0,
            failed_checks: 0,
            errors: Vec::new(),
        }
    }

    /// The test's root section.
    pub fn root(&self) -> SectionId {
        self.root
    }

    /// The current path from the root to the section the scheduler is
    /// presently inside, inclusive of both ends.
    pub fn path(&self) -> &[SectionId] {
        &self.path
    }

    /// The section currently on top of the path.
    pub fn current_section(&self) -> SectionId {
        *self.path.last().expect("execution context path is never empty")
    }

    pub fn push_section(&mut self, id: SectionId) {
        self.path.push(id);
    }

    pub fn pop_section(&mut self) {
        self.path.pop();
        debug_assert!(!self.path.is_empty(), "popped the root section off the path");
    }

    pub fn exec_count(&self) -> u64 {
        self.exec_count
    }

    pub fn leaf_section(&self) -> Option<SectionId> {
        self.leaf_section
    }

    pub fn set_leaf_section(&mut self, id: SectionId) {
        if self.leaf_section.is_none() {
            self.leaf_section = Some(id);
        }
    }

    /// Resets the per-run transient counters. Called at the top of each
    /// scheduler iteration so the next run starts clean.
    pub fn begin_run(&mut self) {
        self.exec_count += 1;
        self.leaf_section = None;
        self.executed_checks = 0;
        self.failed_checks = 0;
        self.errors.clear();
        self.path.truncate(1);
    }

    /// Takes the transient stats accumulated during the run just finished,
    /// leaving zeroed counters behind for the next iteration.
    pub fn take_run_stats(&mut self) -> (u64, u64, Vec<TestError>) {
        (
            std::mem::take(&mut self.executed_checks),
            std::mem::take(&mut self.failed_checks),
            std::mem::take(&mut self.errors),
        )
    }

    /// Publishes a check record, folding it into the transient counters.
    /// Returns `true` if this publication should raise the require-failed
    /// signal.
    pub fn publish_check(&mut self, record: CheckRecord) -> bool {
        self.executed_checks += 1;
        if !record.passed {
            self.failed_checks += 1;
        }
        record.kind == CheckKind::Require && !record.passed
    }

    pub fn push_error(&mut self, error: TestError) {
        self.errors.push(error);
    }
}

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<ExecutionContext>> = const { RefCell::new(Vec::new()) };
}

/// Begins a new test, pushing a fresh context onto the thread-local stack.
pub fn push_context(root: SectionId) {
    CONTEXT_STACK.with(|stack| stack.borrow_mut().push(ExecutionContext::new(root)));
}

/// Ends the active test, popping its context off the stack.
pub fn pop_context() -> ExecutionContext {
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().pop().expect("pop_context called with no active execution context")
    })
}

/// Runs `f` against the active (topmost) execution context.
///
/// # Panics
/// Panics if called outside of a running test. `CHECK`/`SECTION` used outside
/// the scheduler loop is a programming error, not a test failure.
pub fn with_current<R>(f: impl FnOnce(&mut ExecutionContext) -> R) -> R {
    CONTEXT_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let ctx = stack.last_mut().expect("check or section used outside of a running test");
        f(ctx)
    })
}

/// Runs `f` against the active context, if any, without panicking when
/// there isn't one. Used by the hard-assertion interception hook, which may
/// fire on threads with no active test.
pub fn try_with_current<R>(f: impl FnOnce(&mut ExecutionContext) -> R) -> Option<R> {
    CONTEXT_STACK.with(|stack| stack.borrow_mut().last_mut().map(f))
}

/// Publishes a check into the active context, raising the require-failed
/// signal if warranted.
pub fn publish(record: CheckRecord) {
    let raise = with_current(|ctx| ctx.publish_check(record));
    if raise {
        std::panic::panic_any(Unwind::RequireFailed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn sample_record(kind: CheckKind, passed: bool) -> CheckRecord {
        CheckRecord {
            kind,
            op: None,
            expr_text: "x".into(),
            passed,
            location: Location { file: "a.rs", line: 1 },
            extra_lines: Vec::new(),
            expanded: "'x' failed".into(),
        }
    }

    #[test]
    fn publish_check_counts_failures() {
        let mut ctx = ExecutionContext::new(SectionId::from_index(0));
        ctx.publish_check(sample_record(CheckKind::Check, true));
        ctx.publish_check(sample_record(CheckKind::Check, false));
        assert_eq!(ctx.executed_checks, 2);
        assert_eq!(ctx.failed_checks, 1);
    }

    #[test]
    fn failed_require_signals_raise() {
        let mut ctx = ExecutionContext::new(SectionId::from_index(0));
        assert!(ctx.publish_check(sample_record(CheckKind::Require, false)));
        assert!(!ctx.publish_check(sample_record(CheckKind::Require, true)));
        assert!(!ctx.publish_check(sample_record(CheckKind::Check, false)));
    }

    #[test]
    fn begin_run_resets_transient_state_and_truncates_path() {
        let mut ctx = ExecutionContext::new(SectionId::from_index(0));
        ctx.push_section(SectionId::from_index(1));
        ctx.publish_check(sample_record(CheckKind::Check, false));
        ctx.begin_run();
        assert_eq!(ctx.exec_count(), 1);
        assert_eq!(ctx.path(), &[SectionId::from_index(0)]);
        assert_eq!(ctx.take_run_stats(), (0, 0, Vec::new()));
    }

    #[test]
    fn stack_only_exposes_the_top_frame() {
        push_context(SectionId::from_index(0));
        with_current(|ctx| ctx.push_section(SectionId::from_index(1)));
        push_context(SectionId::from_index(10));
        with_current(|ctx| assert_eq!(ctx.current_section(), SectionId::from_index(10)));
        pop_context();
        with_current(|ctx| assert_eq!(ctx.current_section(), SectionId::from_index(1)));
        pop_context();
    }
}
