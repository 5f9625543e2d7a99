use crate::Location;

/// A typed internal unwind signal, distinct from panics a test author raises
/// themselves.
///
/// Carried as a panic payload via [`std::panic::panic_any`]. The scheduler
/// loop downcasts caught payloads against this type before falling back to
/// [`TestFailure`] and finally treating the panic as an unknown failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Unwind {
    /// Raised by [`crate::context::publish`] when a `REQUIRE` fails.
    #[error("require failed")]
    RequireFailed,
    /// Raised by the section tree when a section is re-entered within a
    /// single run.
    #[error("duplicate section: \"{name}\"")]
    DuplicateSection { name: String, location: Location },
}

/// A typed failure a test body can raise deliberately, carrying a message.
///
/// The scheduler attributes this to the "uncaught typed failure" category
/// (continues exploring other leaves) rather than "unknown failure".
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TestFailure {
    pub message: String,
}

impl TestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Raises this failure, unwinding the current run.
    pub fn raise(message: impl Into<String>) -> ! {
        std::panic::panic_any(Self::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwind_messages_are_stable() {
        assert_eq!(Unwind::RequireFailed.to_string(), "require failed");
        let dup = Unwind::DuplicateSection {
            name: "dup".into(),
            location: Location { file: "a.rs", line: 1 },
        };
        assert_eq!(dup.to_string(), "duplicate section: \"dup\"");
    }

    #[test]
    fn test_failure_display_is_the_message() {
        let failure = TestFailure::new("boom");
        assert_eq!(failure.to_string(), "boom");
    }
}
