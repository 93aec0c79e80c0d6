//! Error types for the cost_forecast crate

use thiserror::Error;

/// Custom error types for the cost_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed input rows
    #[error("Data error: {0}")]
    DataError(String),

    /// Rejected request parameters such as a non-positive horizon
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Engine tuning parameters out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unparsable dates or option values
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error from numeric helpers
    #[error("Math error: {0}")]
    MathError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON encoding or decoding
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<cost_math::MathError> for ForecastError {
    fn from(err: cost_math::MathError) -> Self {
        ForecastError::MathError(err.to_string())
    }
}

impl From<chrono::ParseError> for ForecastError {
    fn from(err: chrono::ParseError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}
