//! Error types for the fake client.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a dynamic fixture.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while registering, resolving or recording fake calls.
#[derive(Debug, Error)]
pub enum FakeError {
    /// No exact or wildcard fixture matches the dispatched method key.
    #[error(
        "No fake registered for [{method}]. Register one with \
         client.fake(\"{method}\", json!({{\"id\": \"...\"}})) before calling it."
    )]
    NotRegistered {
        /// The method key that was dispatched.
        method: String,
    },

    /// A dynamic fixture returned an error; surfaced unchanged.
    #[error(transparent)]
    Fixture(BoxError),

    /// A fixture file could not be loaded.
    #[error("Failed to load fixture file {}: {reason}", path.display())]
    FixtureFile {
        /// Path of the fixture file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// A method key is not of the form `<service>.<operation>`.
    #[error("Invalid method key {0:?}: expected \"<service>.<operation>\"")]
    InvalidMethodKey(String),

    /// Call parameters were not a JSON object.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A response could not be rendered as JSON.
    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A cassette could not be read, parsed or written.
    #[error("Cassette error at {}: {reason}", path.display())]
    Cassette {
        /// Cassette path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

impl FakeError {
    /// Shorthand for [`FakeError::NotRegistered`].
    pub fn not_registered(method: impl Into<String>) -> Self {
        Self::NotRegistered {
            method: method.into(),
        }
    }

    /// Returns true when this error means no fixture matched.
    #[must_use]
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }
}
