use std::fmt;

/// A source location where a check or section was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// File path as reported by the compiler at the call site.
    pub file: &'static str,
    /// 1-based line number at the call site.
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
