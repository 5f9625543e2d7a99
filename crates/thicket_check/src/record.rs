use crate::{Comparison, Location};

/// Whether a check is soft (`CHECK`, continues on failure) or hard
/// (`REQUIRE`, unwinds the current run on failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Check,
    Require,
}

/// A single published check, folded into a leaf section's stats once the
/// check handle that built it goes out of scope.
#[derive(Debug, Clone)]
pub struct CheckRecord {
    pub kind: CheckKind,
    pub op: Option<Comparison>,
    pub expr_text: String,
    pub passed: bool,
    pub location: Location,
    pub extra_lines: Vec<String>,
    pub expanded: String,
}

/// A framework- or user-attributed error attached to a section.
///
/// `expr` is the raw source text the error concerns; `expanded` is the
/// diagnostic rendering. The two must never be equal — some IDE integrations
/// collapse diagnostics to a bare "failed" otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TestError {
    pub expr: String,
    pub location: Location,
    pub extra_lines: Vec<String>,
    pub expanded: String,
}

impl TestError {
    /// Builds a `TestError`.
    ///
    /// Debug builds assert the diagnostic rule at construction time rather
    /// than leaving it to be discovered downstream in a report.
    pub fn new(
        expr: impl Into<String>,
        location: Location,
        extra_lines: Vec<String>,
        expanded: impl Into<String>,
    ) -> Self {
        let expr = expr.into();
        let expanded = expanded.into();
        debug_assert_ne!(expr, expanded, "diagnostic rule violated: expr and expanded must differ");
        Self { expr, location, extra_lines, expanded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_kind_equality() {
        assert_eq!(CheckKind::Check, CheckKind::Check);
        assert_ne!(CheckKind::Check, CheckKind::Require);
    }

    #[test]
    fn test_error_preserves_fields() {
        let location = Location { file: "a.rs", line: 1 };
        let error = TestError::new("dup", location, vec!["note: x".into()], "duplicate section: \"dup\"");
        assert_eq!(error.expr, "dup");
        assert_eq!(error.location, location);
        assert_eq!(error.extra_lines, vec!["note: x".to_string()]);
        assert_ne!(error.expr, error.expanded);
    }
}
