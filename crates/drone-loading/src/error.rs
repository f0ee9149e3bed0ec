//! Error types for the loading engine

use crate::state_machine::LoadEvent;
use drone_types::DroneStatus;
use thiserror::Error;

/// Loading engine errors
#[derive(Debug, Error)]
pub enum LoadingError {
    /// A configured validation pattern did not compile
    #[error("Invalid {field} pattern: {source}")]
    InvalidPattern {
        field: &'static str,
        source: regex::Error,
    },

    /// The drone's state does not allow the requested transition
    #[error("Illegal transition from {from} on {event:?}")]
    IllegalTransition { from: DroneStatus, event: LoadEvent },
}

/// Result type for loading operations
pub type Result<T> = std::result::Result<T, LoadingError>;
