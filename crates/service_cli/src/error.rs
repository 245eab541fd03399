//! Error types for the FinData CLI.

use synth_core::types::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Parameter rejected by a simulator
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input row that cannot be interpreted
    #[error("Malformed CSV row at time step {row}: {reason}")]
    MalformedRow {
        /// Zero-based data row (time step)
        row: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Input file shorter than the requested duration
    #[error("Factor input has {found} data rows, {expected} required")]
    InsufficientData {
        /// Rows required
        expected: usize,
        /// Rows found
        found: usize,
    },

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create a malformed-row error
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
