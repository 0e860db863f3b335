//! Cassette data structures for recorded fake calls.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FakeError;
use crate::fixture::Params;

/// A single call dispatched to the fake client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Method key, e.g. `"customers.create"`.
    pub method: String,
    /// Params the call was recorded with.
    pub params: Params,
    /// `{"Ok": response}` or `{"Err": message}` once the call has resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<serde_json::Value>,
}

impl Interaction {
    /// True when the call resolved to a response.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.get("Ok").is_some())
    }
}

/// A snapshot of every call made against one fake client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was taken.
    pub recorded_at: DateTime<Utc>,
    /// Calls in dispatch order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Read a cassette back from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::Cassette`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FakeError> {
        let content = std::fs::read_to_string(path).map_err(|e| FakeError::Cassette {
            path: path.to_path_buf(),
            reason: format!("read failed: {e}"),
        })?;
        serde_yaml::from_str(&content).map_err(|e| FakeError::Cassette {
            path: path.to_path_buf(),
            reason: format!("parse failed: {e}"),
        })
    }

    /// Write this cassette as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::Cassette`] if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<(), FakeError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| FakeError::Cassette {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, yaml).map_err(|e| FakeError::Cassette {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Interactions for one method key, in order.
    pub fn for_method<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a Interaction> {
        self.interactions.iter().filter(move |i| i.method == method)
    }
}
