//! Drone Types - Core types for the drone fleet load-allocation engine
//!
//! These types are shared by the registry, the loading engine and the fleet
//! coordinator. They carry no decision logic beyond weight bookkeeping.
//!
//! ## Key Concepts
//!
//! - **Drone**: A registered drone with a weight limit, battery and state
//! - **CargoSpec**: A proposed cargo item as it arrives in a load request
//! - **CargoItem**: An accepted cargo item, possibly attached to a drone
//! - **LoadRequest**: The external input of one load attempt
//! - **FleetEvent**: Observability stream of registration and load activity

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod cargo;
pub mod drone;
pub mod events;
pub mod ids;
pub mod request;

// Re-export main types
pub use cargo::{CargoItem, CargoSpec};
pub use drone::{Drone, DroneModel, DroneStatus, WEIGHT_TOLERANCE};
pub use events::{EventSeverity, FleetEvent, FleetEventEnvelope};
pub use ids::{CargoItemId, SerialNumber};
pub use request::LoadRequest;
