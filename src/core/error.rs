//! Error types for the query builder.
//!
//! Nothing in the cascade or editor surfaces these to its caller: fetch
//! failures are logged and turned into degraded candidate lists, and
//! structural problems travel as [`ValidationErrors`](crate::models::ValidationErrors)
//! on the target. [`QueryError`] exists so that catalog clients, the panel
//! and the configuration loader can report what went wrong in a typed way.

use thiserror::Error;

use super::Level;

/// Errors produced while building queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The catalog client returned an error for a level's fetch.
    #[error("Failed to fetch {level} candidates: {message}")]
    FetchFailed {
        /// Level whose candidate list was being refreshed
        level: Level,
        /// Rendered error chain from the client
        message: String,
    },

    /// The catalog client did not answer within the configured timeout.
    #[error("Fetching {level} candidates timed out after {timeout_ms}ms")]
    FetchTimedOut {
        /// Level whose candidate list was being refreshed
        level: Level,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Editor configuration could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// A panel operation referenced a target that does not exist.
    #[error("Target index {index} is out of range (panel has {len} targets)")]
    TargetIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of targets in the panel
        len: usize,
    },
}

impl QueryError {
    /// Build a [`QueryError::FetchFailed`] from any client error, keeping the
    /// full cause chain in the message.
    pub fn fetch_failed(level: Level, err: &anyhow::Error) -> Self {
        Self::FetchFailed {
            level,
            message: format!("{err:#}"),
        }
    }

    /// Returns true for errors that come from talking to the catalog.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. } | Self::FetchTimedOut { .. })
    }
}
