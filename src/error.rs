//! Error type for the file and parsing boundaries of the crate
//!
//! The calculations themselves never fail; only loading configuration,
//! revaluation histories and batch files (or writing reports) can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown pension scheme: {0}")]
    UnknownScheme(String),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
