//! YAML fixture files.
//!
//! ```yaml
//! name: billing
//! fixtures:
//!   customers.create:
//!     id: cus_42
//!   "customers.*":
//!     id: cus_any
//! ```
//!
//! The `fixtures` mapping keeps file order, which decides wildcard precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::FixtureTable;
use crate::error::FakeError;

/// A fixture file as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixtureFile {
    /// Human-readable name for this fixture set.
    #[serde(default)]
    pub name: String,
    /// Method key to static response, in file order.
    #[serde(default)]
    pub fixtures: serde_yaml::Mapping,
}

impl FixtureFile {
    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FakeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| file_error(path, format!("read failed: {e}")))?;
        Self::parse(&content, path)
    }

    /// Parse fixture YAML; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] if the YAML is malformed.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, FakeError> {
        serde_yaml::from_str(content).map_err(|e| file_error(origin, format!("parse failed: {e}")))
    }

    /// Convert into a [`FixtureTable`] of static fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] if a key is not a string or a value
    /// cannot be represented as JSON.
    pub fn into_table(self, origin: &Path) -> Result<FixtureTable, FakeError> {
        let mut table = FixtureTable::new();
        for (key, value) in self.fixtures {
            let key = match key {
                serde_yaml::Value::String(key) => key,
                other => {
                    return Err(file_error(
                        origin,
                        format!("fixture key {other:?} is not a string"),
                    ))
                }
            };
            let value = serde_json::to_value(&value)
                .map_err(|e| file_error(origin, format!("fixture {key}: {e}")))?;
            table.insert(key, value);
        }
        Ok(table)
    }

    /// Load a fixture file straight into a table.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] on any read, parse or conversion failure.
    pub fn load_table(path: &Path) -> Result<FixtureTable, FakeError> {
        Self::load(path)?.into_table(path)
    }
}

fn file_error(path: &Path, reason: String) -> FakeError {
    FakeError::FixtureFile {
        path: PathBuf::from(path),
        reason,
    }
}
