//! Drone registry trait
//!
//! Implementations return owned copies; a drone read from the registry is a
//! snapshot, and changes only become visible after [`DroneRegistry::save`].

use crate::error::Result;
use async_trait::async_trait;
use drone_types::{Drone, SerialNumber};

/// Storage for registered drones
#[async_trait]
pub trait DroneRegistry: Send + Sync {
    /// Get a drone by serial number
    async fn find_by_id(&self, serial_number: &SerialNumber) -> Result<Option<Drone>>;

    /// Insert or replace a drone, returning the stored value
    async fn save(&self, drone: Drone) -> Result<Drone>;

    /// List all drones, ordered by serial number
    async fn find_all(&self) -> Result<Vec<Drone>>;
}
