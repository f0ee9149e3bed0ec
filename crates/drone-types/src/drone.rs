//! Drone types
//!
//! A Drone is the unit the fleet coordinator loads. Its cargo list is private
//! so the weight invariant can only be changed through [`Drone::attach_cargo`].

use crate::{CargoItem, SerialNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slack allowed when comparing summed weights against a limit.
///
/// Weights are fractional grams; sums taken in different orders can differ in
/// the last bit, which must not turn an exact fit into an overload.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// A registered delivery drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    /// Registry key
    pub serial_number: SerialNumber,

    /// Model class
    pub model: DroneModel,

    /// Weight capacity in grams
    pub weight_limit: f64,

    /// Battery charge, 0 to 100
    pub battery_percentage: u8,

    /// Operational state
    pub state: DroneStatus,

    /// Loaded cargo in attachment order
    #[serde(default)]
    cargo: Vec<CargoItem>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Drone {
    /// Create an empty drone
    pub fn new(
        serial_number: impl Into<SerialNumber>,
        model: DroneModel,
        weight_limit: f64,
        battery_percentage: u8,
        state: DroneStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            serial_number: serial_number.into(),
            model,
            weight_limit,
            battery_percentage,
            state,
            cargo: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach preloaded cargo at construction time
    pub fn with_cargo(mut self, cargo: Vec<CargoItem>) -> Self {
        self.attach_cargo(cargo);
        self
    }

    /// Rebuild a stored drone's cargo, keeping each item's id and attach time.
    ///
    /// Items without an attach time are stamped now. Timestamps of the drone
    /// itself are left alone.
    pub fn with_attached_cargo(mut self, cargo: Vec<CargoItem>) -> Self {
        let now = Utc::now();
        for mut item in cargo {
            item.drone = Some(self.serial_number.clone());
            item.attached_at.get_or_insert(now);
            self.cargo.push(item);
        }
        self
    }

    /// Loaded cargo, in attachment order
    pub fn cargo(&self) -> &[CargoItem] {
        &self.cargo
    }

    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty()
    }

    /// Sum of the weights of all attached cargo
    pub fn loaded_weight(&self) -> f64 {
        self.cargo.iter().map(|c| c.weight).sum()
    }

    /// Weight budget left before the limit is reached
    pub fn available_capacity(&self) -> f64 {
        self.weight_limit - self.loaded_weight()
    }

    /// Whether the loaded weight is within the weight limit
    pub fn within_capacity(&self) -> bool {
        self.loaded_weight() <= self.weight_limit + WEIGHT_TOLERANCE
    }

    /// Attach cargo to this drone, linking each item back to it.
    ///
    /// The caller is responsible for having checked capacity.
    pub fn attach_cargo(&mut self, items: impl IntoIterator<Item = CargoItem>) {
        let now = Utc::now();
        for mut item in items {
            item.drone = Some(self.serial_number.clone());
            item.attached_at = Some(now);
            self.cargo.push(item);
        }
        self.updated_at = now;
    }

    /// Set the operational state and bump the audit timestamp
    pub fn set_state(&mut self, state: DroneStatus) {
        self.state = state;
        self.updated_at = Utc::now();
    }
}

/// Drone model classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneModel {
    Lightweight,
    Middleweight,
    Cruiserweight,
    Heavyweight,
}

/// Drone operational state
///
/// Only `Idle`, `Loading` and `Loaded` take part in load transitions. The
/// delivery states are owned by the delivery workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneStatus {
    Idle,
    Loading,
    Loaded,
    Delivering,
    Delivered,
    Returning,
}

impl DroneStatus {
    /// States in which a drone may take on cargo
    pub fn accepts_cargo(&self) -> bool {
        matches!(self, DroneStatus::Idle | DroneStatus::Loading)
    }
}

impl Default for DroneStatus {
    fn default() -> Self {
        DroneStatus::Idle
    }
}

impl std::fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DroneStatus::Idle => "IDLE",
            DroneStatus::Loading => "LOADING",
            DroneStatus::Loaded => "LOADED",
            DroneStatus::Delivering => "DELIVERING",
            DroneStatus::Delivered => "DELIVERED",
            DroneStatus::Returning => "RETURNING",
        };
        f.write_str(s)
    }
}
