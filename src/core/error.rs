//! Error type shared by every engine operation.

use thiserror::Error;

/// Errors returned by the loyalty engine.
///
/// Mutations either apply fully or fail with one of these before any state
/// is written back.
#[derive(Debug, Error)]
pub enum LoyaltyError {
    /// Unknown user, task or badge id
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up ("user", "task", "badge")
        kind: &'static str,
        /// The id that had no match
        id: String,
    },

    /// Caller supplied an unusable value (e.g. a non-positive point delta)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Static catalog or config file is malformed
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Underlying store I/O failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A stored record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoyaltyError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for the NotFound variant.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LoyaltyError>;
