//! Drone state machine for load cycles
//!
//! ```text
//! IDLE | LOADING --BeginLoading--> LOADING --CargoAttached--> LOADED
//!                                  LOADING --NothingLoaded--> LOADING (StayLoading)
//!                                                         \-> previous (RevertToPrevious)
//! ```
//!
//! Nothing here returns a drone to `IDLE`; that belongs to the delivery
//! workflow.

use crate::error::{LoadingError, Result};
use drone_types::{Drone, DroneStatus};
use serde::{Deserialize, Serialize};

/// What happens to a `LOADING` drone when nothing could be attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightExceededPolicy {
    /// Leave the drone in `LOADING` with nothing attached
    #[default]
    StayLoading,
    /// Return the drone to the state it had before the attempt
    RevertToPrevious,
}

/// Events that drive load transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// Gate passed and at least one valid item was proposed
    BeginLoading,
    /// The allocator selected at least one item and it was attached
    CargoAttached,
    /// The allocator selected nothing
    NothingLoaded { previous: DroneStatus },
}

/// A performed state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: DroneStatus,
    pub to: DroneStatus,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DroneStateMachine {
    policy: WeightExceededPolicy,
}

impl DroneStateMachine {
    pub fn new(policy: WeightExceededPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> WeightExceededPolicy {
        self.policy
    }

    /// Compute the state reached from `current` on `event`
    pub fn next(&self, current: DroneStatus, event: LoadEvent) -> Result<DroneStatus> {
        match (current, event) {
            (DroneStatus::Idle | DroneStatus::Loading, LoadEvent::BeginLoading) => {
                Ok(DroneStatus::Loading)
            }
            (DroneStatus::Loading, LoadEvent::CargoAttached) => Ok(DroneStatus::Loaded),
            (DroneStatus::Loading, LoadEvent::NothingLoaded { previous }) => match self.policy {
                WeightExceededPolicy::StayLoading => Ok(DroneStatus::Loading),
                WeightExceededPolicy::RevertToPrevious if previous.accepts_cargo() => Ok(previous),
                WeightExceededPolicy::RevertToPrevious => {
                    Err(LoadingError::IllegalTransition { from: current, event })
                }
            },
            (from, event) => Err(LoadingError::IllegalTransition { from, event }),
        }
    }

    /// Apply `event` to the drone
    pub fn apply(&self, drone: &mut Drone, event: LoadEvent) -> Result<Transition> {
        let from = drone.state;
        let to = self.next(from, event)?;
        if from != to {
            drone.set_state(to);
        }
        Ok(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_types::DroneModel;

    #[test]
    fn test_begin_loading() {
        let machine = DroneStateMachine::default();
        assert_eq!(
            machine.next(DroneStatus::Idle, LoadEvent::BeginLoading).unwrap(),
            DroneStatus::Loading
        );
        assert_eq!(
            machine.next(DroneStatus::Loading, LoadEvent::BeginLoading).unwrap(),
            DroneStatus::Loading
        );
    }

    #[test]
    fn test_cargo_attached_requires_loading() {
        let machine = DroneStateMachine::default();
        assert_eq!(
            machine.next(DroneStatus::Loading, LoadEvent::CargoAttached).unwrap(),
            DroneStatus::Loaded
        );
        assert!(machine.next(DroneStatus::Idle, LoadEvent::CargoAttached).is_err());
    }

    #[test]
    fn test_busy_states_cannot_begin_loading() {
        let machine = DroneStateMachine::default();
        for state in [DroneStatus::Loaded, DroneStatus::Delivering, DroneStatus::Returning] {
            let err = machine.next(state, LoadEvent::BeginLoading).unwrap_err();
            assert!(matches!(err, LoadingError::IllegalTransition { from, .. } if from == state));
        }
    }

    #[test]
    fn test_nothing_loaded_stays_loading_by_default() {
        let machine = DroneStateMachine::default();
        let next = machine
            .next(
                DroneStatus::Loading,
                LoadEvent::NothingLoaded {
                    previous: DroneStatus::Idle,
                },
            )
            .unwrap();
        assert_eq!(next, DroneStatus::Loading);
    }

    #[test]
    fn test_nothing_loaded_can_revert() {
        let machine = DroneStateMachine::new(WeightExceededPolicy::RevertToPrevious);
        let mut drone = Drone::new("DRN-1", DroneModel::Lightweight, 100.0, 90, DroneStatus::Idle);

        machine.apply(&mut drone, LoadEvent::BeginLoading).unwrap();
        let transition = machine
            .apply(
                &mut drone,
                LoadEvent::NothingLoaded {
                    previous: DroneStatus::Idle,
                },
            )
            .unwrap();

        assert!(transition.changed());
        assert_eq!(drone.state, DroneStatus::Idle);
    }

    #[test]
    fn test_apply_reports_unchanged_transition() {
        let machine = DroneStateMachine::default();
        let mut drone =
            Drone::new("DRN-1", DroneModel::Lightweight, 100.0, 90, DroneStatus::Loading);
        let before = drone.updated_at;

        let transition = machine.apply(&mut drone, LoadEvent::BeginLoading).unwrap();
        assert!(!transition.changed());
        assert_eq!(drone.updated_at, before);
    }

    #[test]
    fn test_policy_wire_format() {
        let policy: WeightExceededPolicy = serde_json::from_str("\"revert_to_previous\"").unwrap();
        assert_eq!(policy, WeightExceededPolicy::RevertToPrevious);
    }
}
