//! Error types for the fleet coordinator

use drone_types::SerialNumber;
use thiserror::Error;

/// Fleet coordinator error type
#[derive(Debug, Error)]
pub enum FleetError {
    /// No drone is registered under the serial number
    #[error("Drone not found: {0}")]
    DroneNotFound(SerialNumber),

    /// Registration input was rejected
    #[error("Drone registration rejected: {0}")]
    Registration(#[from] RegistrationError),

    /// Registry subsystem error
    #[error("Registry error: {0}")]
    Registry(#[from] drone_registry::RegistryError),

    /// Loading engine error
    #[error("Loading error: {0}")]
    Loading(#[from] drone_loading::LoadingError),

    /// Coordinator could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;

impl FleetError {
    pub fn drone_not_found(serial_number: &SerialNumber) -> Self {
        Self::DroneNotFound(serial_number.clone())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DroneNotFound(_))
    }
}

/// Reasons a drone registration is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("Serial number is empty")]
    EmptySerial,

    #[error("Serial number cannot exceed {max} characters (got {len})")]
    SerialTooLong { len: usize, max: usize },

    #[error("Battery percentage {0} is above 100")]
    BatteryOutOfRange(u8),

    #[error("Weight limit {0} must be a positive number")]
    InvalidWeightLimit(f64),

    #[error("Preloaded cargo weighs {loaded}, above the weight limit {limit}")]
    OverCapacity { loaded: f64, limit: f64 },
}
