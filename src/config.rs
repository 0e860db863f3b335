//! Environment configuration.
//!
//! - `STRIPE_FAKE_FIXTURES`: fixture file to preload into a client.
//! - `STRIPE_FAKE_RECORD`: cassette path written after a CLI command.
//!
//! A `.env` file in the working directory is honored when present.

use std::path::PathBuf;

/// Environment variable naming a fixture file.
pub const FIXTURES_VAR: &str = "STRIPE_FAKE_FIXTURES";
/// Environment variable naming a cassette output path.
pub const RECORD_VAR: &str = "STRIPE_FAKE_RECORD";

/// Where fixtures come from and where recordings go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeConfig {
    /// Fixture file to preload.
    pub fixtures: Option<PathBuf>,
    /// Cassette file to write the call log to.
    pub record: Option<PathBuf>,
}

impl FakeConfig {
    /// Read configuration from the process environment (and `.env`).
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        Self {
            fixtures: path(FIXTURES_VAR),
            record: path(RECORD_VAR),
        }
    }

    /// Override the fixture file, e.g. from a command-line flag.
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: Option<PathBuf>) -> Self {
        if fixtures.is_some() {
            self.fixtures = fixtures;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_both_variables() {
        let config = FakeConfig::from_lookup(lookup(&[
            (FIXTURES_VAR, "fixtures/billing.yaml"),
            (RECORD_VAR, "out/calls.yaml"),
        ]));
        assert_eq!(
            config.fixtures,
            Some(PathBuf::from("fixtures/billing.yaml"))
        );
        assert_eq!(config.record, Some(PathBuf::from("out/calls.yaml")));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = FakeConfig::from_lookup(lookup(&[(FIXTURES_VAR, "  "), (RECORD_VAR, "")]));
        assert_eq!(config, FakeConfig::default());
    }

    #[test]
    fn flag_overrides_environment() {
        let config = FakeConfig::from_lookup(lookup(&[(FIXTURES_VAR, "env.yaml")]))
            .with_fixtures(Some(PathBuf::from("flag.yaml")));
        assert_eq!(config.fixtures, Some(PathBuf::from("flag.yaml")));

        let config =
            FakeConfig::from_lookup(lookup(&[(FIXTURES_VAR, "env.yaml")])).with_fixtures(None);
        assert_eq!(config.fixtures, Some(PathBuf::from("env.yaml")));
    }
}
