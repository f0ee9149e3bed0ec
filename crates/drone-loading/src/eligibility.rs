//! Eligibility gate
//!
//! A low-battery drone must never enter a loading cycle. `LOADING` is
//! re-entrant so the same drone can be loaded over several calls.

use drone_types::{Drone, DroneStatus};
use std::fmt;

/// Minimum battery percentage required to start or continue loading
pub const MIN_LOAD_BATTERY: u8 = 25;

/// Why a drone may not accept cargo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    LowBattery { battery_percentage: u8, required: u8 },
    Busy(DroneStatus),
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::LowBattery {
                battery_percentage,
                required,
            } => write!(f, "battery at {}%, {}% required", battery_percentage, required),
            Ineligibility::Busy(state) => write!(f, "drone is {}", state),
        }
    }
}

/// Decides whether a drone may begin accepting cargo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityGate {
    min_battery: u8,
}

impl EligibilityGate {
    pub fn new(min_battery: u8) -> Self {
        Self { min_battery }
    }

    pub fn min_battery(&self) -> u8 {
        self.min_battery
    }

    pub fn can_accept_load(&self, drone: &Drone) -> bool {
        self.ineligibility(drone).is_none()
    }

    /// The first reason the drone is ineligible, battery checked first
    pub fn ineligibility(&self, drone: &Drone) -> Option<Ineligibility> {
        if drone.battery_percentage < self.min_battery {
            return Some(Ineligibility::LowBattery {
                battery_percentage: drone.battery_percentage,
                required: self.min_battery,
            });
        }
        if !drone.state.accepts_cargo() {
            return Some(Ineligibility::Busy(drone.state));
        }
        None
    }
}

impl Default for EligibilityGate {
    fn default() -> Self {
        Self::new(MIN_LOAD_BATTERY)
    }
}
