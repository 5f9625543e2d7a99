//! Build metadata surfaced to callers of the runtime layer.

/// Version and build-mode metadata for the embedding binary.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Framework version string.
    pub version: &'static str,
    /// Whether running in debug mode.
    pub debug: bool,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            debug: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_info_default() {
        let info = BuildInfo::default();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
