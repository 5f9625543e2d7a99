/// Scheduler/run configuration. Parsing this from CLI arguments or a config
/// file is left to the embedding binary.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Substring filters applied against a declaration's name. Empty means
    /// "no filtering".
    pub filters: Vec<String>,
    /// Whether declarations with `config.enabled == false` are scheduled.
    pub run_disabled_tests: bool,
    /// Raises the default logging filter level when paired with
    /// [`thicket_core::logging::init`].
    pub verbose: bool,
    /// Opaque to the core: a reporter-mode flag forwarded as-is.
    pub is_discovery_mode: bool,
    /// Opaque to the core: a reporter-mode flag forwarded as-is.
    pub report_xml_results: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            run_disabled_tests: false,
            verbose: false,
            is_discovery_mode: false,
            report_xml_results: false,
        }
    }
}

impl RunConfig {
    fn matches(&self, name: &str) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| name.contains(f.as_str()))
    }
}

pub(crate) fn should_schedule(config: &RunConfig, name: &str, enabled: bool) -> bool {
    (enabled || config.run_disabled_tests) && config.matches(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_everything() {
        let config = RunConfig::default();
        assert!(config.matches("anything"));
    }

    #[test]
    fn filters_require_a_substring_match() {
        let config = RunConfig { filters: vec!["foo".into()], ..RunConfig::default() };
        assert!(config.matches("test_foo_bar"));
        assert!(!config.matches("test_baz"));
    }

    #[test]
    fn disabled_declarations_are_excluded_unless_requested() {
        let config = RunConfig::default();
        assert!(!should_schedule(&config, "t", false));
        let config = RunConfig { run_disabled_tests: true, ..RunConfig::default() };
        assert!(should_schedule(&config, "t", false));
    }
}
