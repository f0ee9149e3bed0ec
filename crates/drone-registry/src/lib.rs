//! Drone Registry - the storage seam of the fleet engine
//!
//! The fleet coordinator never owns drones beyond one operation; it reads and
//! writes them through a [`DroneRegistry`].
//!
//! ## In-Memory vs Persistent
//!
//! The crate provides an in-memory implementation suitable for development and
//! testing. Production deployments should use a persistent backend that
//! implements the same trait and gives read-your-write consistency per serial.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod memory;
pub mod registry;

// Re-exports
pub use error::{RegistryError, Result};
pub use memory::InMemoryDroneRegistry;
pub use registry::DroneRegistry;
