//! Error types for operational failures.
//!
//! Rejected user input is not an error in this sense: validators return
//! [`ValidationError`](crate::validation::ValidationError) values. This type
//! covers reading configuration and payloads.

use std::path::PathBuf;

/// Error type for fallible I/O and decoding in this crate.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Returned when a file cannot be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a TOML configuration cannot be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration value for {field}: {reason}")]
    ConfigValue {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Returned when a payload is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a backend record lacks a usable field.
    #[error("malformed {record} record: {reason}")]
    MalformedRecord {
        /// Record type ("semester", "milestone").
        record: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}
