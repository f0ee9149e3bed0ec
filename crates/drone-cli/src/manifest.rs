//! Fleet manifest
//!
//! `dronectl` keeps no state of its own. The fleet is read from a JSON
//! manifest into an in-memory registry, and mutating commands write it back.

use crate::error::{CliError, CliResult};
use chrono::{DateTime, Utc};
use drone_types::{CargoItem, CargoItemId, Drone, DroneModel, DroneStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One cargo item as written in a manifest.
///
/// Hand-written entries may omit `id` and `attached_at`; both are filled in on
/// load and kept from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CargoItemId>,
    pub name: String,
    pub weight: f64,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_at: Option<DateTime<Utc>>,
}

impl CargoEntry {
    pub fn into_item(self) -> CargoItem {
        let mut item = CargoItem::new(self.name, self.weight, self.code, self.image);
        if let Some(id) = self.id {
            item.id = id;
        }
        item.attached_at = self.attached_at;
        item
    }
}

impl From<&CargoItem> for CargoEntry {
    fn from(item: &CargoItem) -> Self {
        Self {
            id: Some(item.id),
            name: item.name.clone(),
            weight: item.weight,
            code: item.code.clone(),
            image: item.image.clone(),
            attached_at: item.attached_at,
        }
    }
}

/// One drone as written in a manifest or a `register` input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneEntry {
    pub serial_number: String,
    pub model: DroneModel,
    pub weight_limit: f64,
    pub battery_percentage: u8,
    #[serde(default)]
    pub state: DroneStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cargo: Vec<CargoEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DroneEntry {
    pub fn into_drone(self) -> Drone {
        let mut drone = Drone::new(
            self.serial_number,
            self.model,
            self.weight_limit,
            self.battery_percentage,
            self.state,
        )
        .with_attached_cargo(self.cargo.into_iter().map(CargoEntry::into_item).collect());

        if let Some(created_at) = self.created_at {
            drone.created_at = created_at;
        }
        if let Some(updated_at) = self.updated_at {
            drone.updated_at = updated_at;
        }
        drone
    }
}

impl From<&Drone> for DroneEntry {
    fn from(drone: &Drone) -> Self {
        Self {
            serial_number: drone.serial_number.to_string(),
            model: drone.model,
            weight_limit: drone.weight_limit,
            battery_percentage: drone.battery_percentage,
            state: drone.state,
            cargo: drone.cargo().iter().map(CargoEntry::from).collect(),
            created_at: Some(drone.created_at),
            updated_at: Some(drone.updated_at),
        }
    }
}

/// The on-disk fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetManifest {
    #[serde(default)]
    pub drones: Vec<DroneEntry>,
}

impl FleetManifest {
    /// Read a manifest; a missing file is an empty fleet
    pub fn read(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        read_json(path)
    }

    pub fn write(&self, path: &Path) -> CliResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn from_drones(drones: &[Drone]) -> Self {
        Self {
            drones: drones.iter().map(DroneEntry::from).collect(),
        }
    }
}

/// Parse a JSON input file, naming the file on failure
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::InvalidInput {
        path: path.display().to_string(),
        source,
    })
}
