use crate::Comparison;

/// The algebraic result of decomposing a `CHECK`/`REQUIRE` expression.
///
/// [`Capture::Binary`] is produced when the expression has the shape
/// `lhs OP rhs` for a comparison operator; everything else degrades to
/// [`Capture::Unary`], the bare truthiness case.
#[derive(Debug, Clone)]
pub enum Capture {
    /// `lhs OP rhs` where `OP` is one of the six comparison operators.
    Binary {
        lhs_debug: String,
        rhs_debug: String,
        op: Comparison,
        passed: bool,
    },
    /// Any other expression, judged by its own truthiness.
    Unary { value_debug: String, passed: bool },
}

impl Capture {
    /// Whether the captured expression passed.
    pub fn passed(&self) -> bool {
        match self {
            Capture::Binary { passed, .. } | Capture::Unary { passed, .. } => *passed,
        }
    }

    /// The comparison operator, if this was a binary capture.
    pub fn op(&self) -> Option<Comparison> {
        match self {
            Capture::Binary { op, .. } => Some(*op),
            Capture::Unary { .. } => None,
        }
    }

    /// Builds the human-readable "expanded" diagnostic for this capture.
    ///
    /// `expr_text` is the raw source text of the captured expression. It is
    /// folded into the unary case so `expr` and `expanded` are never
    /// byte-for-byte identical, per the diagnostic rule some IDE
    /// integrations rely on.
    pub fn expanded(&self, expr_text: &str) -> String {
        match self {
            Capture::Binary { lhs_debug, rhs_debug, op, .. } => {
                format!("{lhs_debug} {} {rhs_debug}", op.symbol())
            }
            Capture::Unary { value_debug, passed } => {
                if *passed {
                    format!("'{expr_text}' succeeded ({value_debug})")
                } else {
                    format!("'{expr_text}' failed")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_expansion_always_shows_both_operands() {
        let capture = Capture::Binary {
            lhs_debug: "3".into(),
            rhs_debug: "2".into(),
            op: Comparison::Lt,
            passed: false,
        };
        assert_eq!(capture.expanded("x < y"), "3 < 2");
        assert_ne!(capture.expanded("x < y"), "x < y");
    }

    #[test]
    fn unary_expansion_differs_from_source_text_when_failing() {
        let capture = Capture::Unary { value_debug: "false".into(), passed: false };
        let expanded = capture.expanded("flag_is_ready()");
        assert_eq!(expanded, "'flag_is_ready()' failed");
        assert_ne!(expanded, "flag_is_ready()");
    }

    #[test]
    fn unary_expansion_differs_from_source_text_when_passing() {
        let capture = Capture::Unary { value_debug: "true".into(), passed: true };
        let expanded = capture.expanded("flag_is_ready()");
        assert_ne!(expanded, "flag_is_ready()");
        assert!(expanded.contains("succeeded"));
    }

    #[test]
    fn op_is_none_for_unary_captures() {
        let capture = Capture::Unary { value_debug: "true".into(), passed: true };
        assert_eq!(capture.op(), None);
    }
}
