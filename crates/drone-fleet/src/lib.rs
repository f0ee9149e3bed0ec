//! # Drone Fleet
//!
//! The [`FleetCoordinator`] is the single entry point for fleet operations.
//! It composes the registry and the loading engine behind an async API that:
//!
//! - Serializes every mutation of one drone behind that drone's lock
//! - Returns business results as a tagged [`LoadOutcome`], never as errors
//! - Raises typed [`FleetError`]s for unknown drones, rejected registrations
//!   and registry failures
//! - Emits [`drone_types::FleetEvent`]s for monitoring
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use drone_fleet::{FleetCoordinator, LoadOutcome};
//! use drone_registry::InMemoryDroneRegistry;
//! use drone_types::{CargoSpec, Drone, DroneModel, DroneStatus, LoadRequest};
//!
//! # async fn example() -> drone_fleet::Result<()> {
//! let coordinator = FleetCoordinator::builder()
//!     .with_registry(Arc::new(InMemoryDroneRegistry::new()))
//!     .build()?;
//!
//! coordinator
//!     .register_drone(Drone::new("DRN-1", DroneModel::Lightweight, 500.0, 90, DroneStatus::Idle))
//!     .await?;
//!
//! let outcome = coordinator
//!     .load_drone_with_cargo(LoadRequest::new("DRN-1", vec![CargoSpec::new("Aspirin", 50.0, "ASP_1")]))
//!     .await?;
//! assert!(matches!(outcome, LoadOutcome::Loaded { .. }));
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod builder;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod locks;
pub mod outcome;

// Re-exports
pub use builder::FleetCoordinatorBuilder;
pub use config::{EventsConfig, FleetConfig, LoadingConfig, LoggingConfig, ValidationConfig};
pub use coordinator::FleetCoordinator;
pub use error::{FleetError, RegistrationError, Result};
pub use events::FleetEventBus;
pub use locks::{DroneLockGuard, DroneLocks};
pub use outcome::{LoadFill, LoadOutcome, OutcomeKind};
