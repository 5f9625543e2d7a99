use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use thicket_check::{Location, TestError, TestFailure, Unwind, context};

use crate::active;
use crate::result::{self, SectionReport};

/// Repeats `body` until every section it discovers has been fully explored,
/// classifying each run's terminating condition via the failure-handling
/// rules below.
///
/// The loop recovers from a run that unwinds and immediately starts the
/// next one; `body` is run behind `AssertUnwindSafe` since `SECTION!`'s
/// dynamic-discovery idiom inherently captures shared mutable state
/// (`Cell`/`RefCell`) across runs, which the unwind-safety lints would
/// otherwise reject.
///
/// Installing [`thicket_check::HardAssertGuard`] is the caller's
/// responsibility — it is a process-wide resource meant to be held for an
/// entire suite, not reinstalled per test.
pub fn run_test(name: impl Into<String>, location: Location, mut body: impl FnMut()) -> SectionReport {
    let name = name.into();
    context::push_context(thicket_check::SectionId::from_index(0));
    active::push_tree(name, location);

    loop {
        context::with_current(|ctx| ctx.begin_run());
        active::with_active_tree(|tree| {
            let root = tree.root();
            tree.node_mut(root).next_open_section = None;
        });

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(&mut body));
        let elapsed = start.elapsed();

        let (extra_error, fatal) = match outcome {
            Ok(()) => (None, false),
            Err(payload) => classify_panic(payload, location),
        };

        let target = context::with_current(|ctx| ctx.leaf_section().unwrap_or_else(|| ctx.root()));
        let (executed, failed, mut errors) = context::with_current(|ctx| ctx.take_run_stats());
        if let Some(error) = extra_error {
            errors.push(error);
        }
        apply_run_stats(target, executed, failed, errors, elapsed);

        if fatal {
            active::with_active_tree(|tree| {
                let root = tree.root();
                tree.node_mut(root).is_done = true;
            });
            break;
        }

        let still_pending = active::with_active_tree(|tree| {
            let root = tree.root();
            tree.node(root).next_open_section.is_some()
        });
        if !still_pending {
            active::with_active_tree(|tree| {
                let root = tree.root();
                tree.node_mut(root).is_done = true;
            });
            break;
        }
    }

    let tree = active::pop_tree();
    context::pop_context();
    result::finalize(&tree)
}

/// Classifies a caught panic payload and decides whether the scheduler loop
/// should keep exploring other leaves (`fatal = false`) or give up on the
/// test entirely (`fatal = true`).
fn classify_panic(payload: Box<dyn std::any::Any + Send>, declaration: Location) -> (Option<TestError>, bool) {
    if let Some(unwind) = payload.downcast_ref::<Unwind>() {
        return match unwind {
            // The failing check already recorded itself; the run simply
            // stops early, and other leaves are still worth exploring.
            Unwind::RequireFailed => (None, false),
            Unwind::DuplicateSection { name, location } => (
                Some(TestError::new(
                    name.clone(),
                    *location,
                    Vec::new(),
                    format!("duplicate section: \"{name}\""),
                )),
                true,
            ),
        };
    }

    if let Some(failure) = payload.downcast_ref::<TestFailure>() {
        return (
            Some(TestError::new(
                failure.message.clone(),
                declaration,
                Vec::new(),
                format!("uncaught exception: {}", failure.message),
            )),
            false,
        );
    }

    (
        Some(TestError::new("<unknown panic>", declaration, Vec::new(), "uncaught unknown exception")),
        false,
    )
}

fn apply_run_stats(target: thicket_check::SectionId, executed: u64, failed: u64, errors: Vec<TestError>, elapsed: Duration) {
    active::with_active_tree(|tree| {
        let node = tree.node_mut(target);
        node.stats.executed_checks += executed;
        node.stats.failed_checks += failed;
        node.stats.errors.extend(errors);
        node.stats.duration += elapsed;
    });
}
