//! Error types for the carprep pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for carprep operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the preprocessing pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::SerializationError(err.to_string())
    }
}
