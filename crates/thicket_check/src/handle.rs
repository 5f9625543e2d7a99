use std::fmt;

use crate::{Capture, CheckKind, CheckRecord, Location, context};

/// Fluent builder for a single `CHECK`/`REQUIRE`/`FAIL`/`SUCCEED` record.
///
/// Built by the check macros, optionally chained with `.context()`,
/// `.note()`, `.dump()`, and published into the active execution context
/// when it goes out of scope. Publication always happens, win or lose,
/// because the check must be counted either way.
pub struct CheckHandle {
    kind: CheckKind,
    capture: Capture,
    expr_text: String,
    location: Location,
    extra_lines: Vec<String>,
}

impl CheckHandle {
    /// Builds a handle from a decomposed expression. Called by the
    /// `CHECK!`/`REQUIRE!` macros, not written by hand.
    #[doc(hidden)]
    pub fn new(kind: CheckKind, capture: Capture, expr_text: impl Into<String>, location: Location) -> Self {
        Self { kind, capture, expr_text: expr_text.into(), location, extra_lines: Vec::new() }
    }

    /// Builds a handle for a bare `FAIL(msg)`: an unconditional hard failure.
    #[doc(hidden)]
    pub fn fail(message: Option<String>, location: Location) -> Self {
        let mut handle = Self::new(
            CheckKind::Require,
            Capture::Unary { value_debug: "false".into(), passed: false },
            "FAIL",
            location,
        );
        if let Some(message) = message {
            handle = handle.note(message);
        }
        handle
    }

    /// Builds a handle for a bare `SUCCEED(msg)`: an unconditional pass.
    #[doc(hidden)]
    pub fn succeed(message: Option<String>, location: Location) -> Self {
        let mut handle = Self::new(
            CheckKind::Check,
            Capture::Unary { value_debug: "true".into(), passed: true },
            "SUCCEED",
            location,
        );
        if let Some(message) = message {
            handle = handle.note(message);
        }
        handle
    }

    /// Appends `"context: {text}"` to the record's extra lines.
    pub fn context(mut self, text: impl fmt::Display) -> Self {
        self.extra_lines.push(format!("context: {text}"));
        self
    }

    /// Appends `"note: {text}"` to the record's extra lines.
    pub fn note(mut self, text: impl fmt::Display) -> Self {
        self.extra_lines.push(format!("note: {text}"));
        self
    }

    /// Appends a debug-formatted dump of `value`.
    pub fn dump(mut self, value: impl fmt::Debug) -> Self {
        self.extra_lines.push(format!("{value:?}"));
        self
    }

    /// Appends a labeled debug-formatted dump of `value`.
    pub fn dump_labeled(mut self, label: impl fmt::Display, value: impl fmt::Debug) -> Self {
        self.extra_lines.push(format!("{label}: {value:?}"));
        self
    }

    fn build_record(&self) -> CheckRecord {
        CheckRecord {
            kind: self.kind,
            op: self.capture.op(),
            expr_text: self.expr_text.clone(),
            passed: self.capture.passed(),
            location: self.location,
            extra_lines: self.extra_lines.clone(),
            expanded: self.capture.expanded(&self.expr_text),
        }
    }
}

impl Drop for CheckHandle {
    fn drop(&mut self) {
        context::publish(self.build_record());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Location {
        Location { file: file!(), line: line!() }
    }

    #[test]
    fn passing_check_does_not_panic_on_drop() {
        context::push_context(crate::SectionId::from_index(0));
        {
            let _handle = CheckHandle::new(
                CheckKind::Check,
                Capture::Binary { lhs_debug: "1".into(), rhs_debug: "1".into(), op: crate::Comparison::Eq, passed: true },
                "1 == 1",
                here(),
            );
        }
        let mut ctx = context::pop_context();
        assert_eq!(ctx.take_run_stats().0, 1);
    }

    #[test]
    #[should_panic(expected = "require failed")]
    fn failing_require_panics_on_drop() {
        context::push_context(crate::SectionId::from_index(0));
        let _handle = CheckHandle::new(
            CheckKind::Require,
            Capture::Unary { value_debug: "false".into(), passed: false },
            "false",
            here(),
        );
    }

    #[test]
    fn chained_notes_and_dumps_become_extra_lines() {
        context::push_context(crate::SectionId::from_index(0));
        {
            let handle = CheckHandle::succeed(None, here()).note("all good").dump_labeled("x", 3);
            drop(handle);
        }
        context::pop_context();
    }
}
