//! Error types for the points spender.

use thiserror::Error;

/// Result type alias for loader, spender and CLI operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading a ledger or spending points.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Row does not have the payer,points,timestamp shape
    #[error("Invalid transaction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Points field is not an integer
    #[error("Invalid points value '{value}' at row {row}")]
    InvalidPoints { row: usize, value: String },

    /// Timestamp field is not an ISO-8601 date-time
    #[error("Invalid timestamp '{value}' at row {row}")]
    InvalidTimestamp { row: usize, value: String },

    /// Points-to-spend argument is not an integer
    #[error("Invalid points to spend '{0}': expected an integer")]
    InvalidAmount(String),

    /// Points-to-spend argument is below zero
    #[error("Points to spend must not be negative, got {0}")]
    NegativeAmount(i64),

    /// Wrong number of command line arguments
    #[error("Usage: points-spender <points-to-spend> <transactions.csv>")]
    Usage,
}
