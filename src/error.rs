//! Ошибки библиотеки

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Column length mismatch: expected {expected}, got {actual} in '{column}'")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Degenerate data: {0}")]
    Degenerate(String),

    #[error("Statistics error: {0}")]
    Distribution(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<linfa_logistic::error::Error> for AnalysisError {
    fn from(err: linfa_logistic::error::Error) -> Self {
        AnalysisError::Model(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Config(err.to_string())
    }
}
