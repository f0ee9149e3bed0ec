//! # Drone Loading
//!
//! The decision logic of a load attempt, free of storage and concurrency
//! concerns. Every component borrows the drone it inspects and keeps nothing.
//!
//! ## Pipeline
//!
//! 1. [`EligibilityGate`] decides whether the drone may start a load cycle
//!    (battery at least 25% and state `IDLE` or `LOADING`).
//! 2. [`CargoFilter`] drops proposed items whose name or code fails the
//!    injected [`CargoValidator`], keeping the submitted order.
//! 3. [`CapacityAllocator`] picks the loadable subset with the three-tier
//!    policy: empty fit, spare capacity, then a single greedy pass.
//! 4. [`DroneStateMachine`] moves the drone through `LOADING` and `LOADED`.
//!
//! ## Example
//!
//! ```rust
//! use drone_loading::{CapacityAllocator, AllocationOutcome};
//! use drone_types::{CargoItem, Drone, DroneModel, DroneStatus};
//!
//! let drone = Drone::new("DRN-1", DroneModel::Lightweight, 20.0, 80, DroneStatus::Loading)
//!     .with_cargo(vec![CargoItem::new("kit", 10.0, "KIT", None)]);
//! let items = vec![
//!     CargoItem::new("a", 6.0, "A", None),
//!     CargoItem::new("b", 5.0, "B", None),
//!     CargoItem::new("c", 4.0, "C", None),
//! ];
//!
//! let allocation = CapacityAllocator.allocate(&drone, items);
//! assert_eq!(allocation.outcome(), AllocationOutcome::PartiallyLoaded);
//! assert_eq!(allocation.selected.len(), 2);
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod allocator;
pub mod eligibility;
pub mod error;
pub mod filter;
pub mod state_machine;
pub mod validator;

// Re-exports
pub use allocator::{Allocation, AllocationOutcome, AllocationTier, CapacityAllocator, SkippedCargo};
pub use eligibility::{EligibilityGate, Ineligibility, MIN_LOAD_BATTERY};
pub use error::{LoadingError, Result};
pub use filter::{CargoFilter, FilterResult, RejectReason, RejectedCargo};
pub use state_machine::{DroneStateMachine, LoadEvent, Transition, WeightExceededPolicy};
pub use validator::{CargoValidator, PatternValidator, DEFAULT_CODE_PATTERN, DEFAULT_NAME_PATTERN};
