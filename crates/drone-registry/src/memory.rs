//! In-memory implementation of the registry trait
//!
//! Suitable for development and testing. Production deployments should use
//! persistent backends.

use crate::error::Result;
use crate::registry::DroneRegistry;
use async_trait::async_trait;
use dashmap::DashMap;
use drone_types::{Drone, SerialNumber};

/// In-memory drone registry
pub struct InMemoryDroneRegistry {
    drones: DashMap<SerialNumber, Drone>,
}

impl InMemoryDroneRegistry {
    pub fn new() -> Self {
        Self {
            drones: DashMap::new(),
        }
    }

    /// Number of stored drones
    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }
}

impl Default for InMemoryDroneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DroneRegistry for InMemoryDroneRegistry {
    async fn find_by_id(&self, serial_number: &SerialNumber) -> Result<Option<Drone>> {
        Ok(self.drones.get(serial_number).map(|d| d.clone()))
    }

    async fn save(&self, drone: Drone) -> Result<Drone> {
        self.drones.insert(drone.serial_number.clone(), drone.clone());
        Ok(drone)
    }

    async fn find_all(&self) -> Result<Vec<Drone>> {
        let mut drones: Vec<Drone> = self.drones.iter().map(|d| d.value().clone()).collect();
        drones.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
        Ok(drones)
    }
}
