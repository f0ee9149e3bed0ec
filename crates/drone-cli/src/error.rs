//! CLI error types

use drone_fleet::FleetError;
use thiserror::Error;

/// Errors surfaced to the operator
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input file {path}: {source}")]
    InvalidInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
