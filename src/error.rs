//! Error types for loading configuration.
//!
//! The simulation itself is total; only host-supplied data can be rejected.

use thiserror::Error;

/// Failure to load or validate a [`crate::Tuning`] file.
#[derive(Debug, Error)]
pub enum TuningError {
    /// The file could not be read.
    #[error("Failed to read tuning file '{path}': {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON was malformed or had wrongly typed fields.
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value was outside its allowed range.
    #[error("Invalid tuning value '{field}': {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
