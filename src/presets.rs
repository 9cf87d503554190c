//! Predefined configurations for common fixture sets.

use crate::config::FixtureConfig;

/// Collection of preset configurations.
pub struct Presets;

impl Presets {
    /// Three valid and three invalid fixtures from `test9`, seed 123.
    pub fn standard() -> FixtureConfig {
        FixtureConfig::default()
    }

    /// Small trees that are easy to read by hand.
    pub fn tiny() -> FixtureConfig {
        FixtureConfig::default()
            .with_start_index(1)
            .with_valid_count(2)
            .with_invalid_count(2)
            .with_employee_range(2..=5)
            .with_special_range(6..=8)
    }

    /// Single-node and two-node trees, including the degenerate invalid case.
    pub fn edge_cases() -> FixtureConfig {
        FixtureConfig::default()
            .with_start_index(1)
            .with_valid_count(2)
            .with_invalid_count(2)
            .with_employee_range(2..=2)
            .with_special_range(1..=1)
    }

    /// Many fixtures with large trees for checker performance.
    pub fn stress() -> FixtureConfig {
        FixtureConfig::default()
            .with_start_index(100)
            .with_valid_count(10)
            .with_invalid_count(10)
            .with_employee_range(200..=400)
            .with_special_range(1000..=1200)
    }

    /// Get all presets as (name, config) pairs.
    pub fn all() -> Vec<(&'static str, FixtureConfig)> {
        vec![
            ("standard", Self::standard()),
            ("tiny", Self::tiny()),
            ("edge_cases", Self::edge_cases()),
            ("stress", Self::stress()),
        ]
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<FixtureConfig> {
        Self::all()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, config)| config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::FixtureRunner;

    #[test]
    fn test_all_presets_are_valid() {
        for (name, config) in Presets::all() {
            assert!(config.validate().is_ok(), "preset {name} is invalid");
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Presets::by_name("tiny"), Some(Presets::tiny()));
        assert!(Presets::by_name("missing").is_none());
    }

    #[test]
    fn test_edge_cases_surface_degenerate_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let config = Presets::edge_cases().with_output_dir(dir.path());
        let mut runner = FixtureRunner::new(config).unwrap();
        let result = runner.run().unwrap();

        // Last invalid fixture has one node and cannot be corrupted.
        assert_eq!(result.validation_failures.len(), 1);
        assert_eq!(result.validation_failures[0].index, 4);
    }
}
