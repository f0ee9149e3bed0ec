//! Main FleetCoordinator implementation
//!
//! The FleetCoordinator services load requests, availability queries and
//! battery/cargo lookups against an injected [`DroneRegistry`]. A load runs
//! the pipeline gate → filter → allocator → state machine while holding the
//! drone's lock, and persists the drone after each state change.

use crate::builder::FleetCoordinatorBuilder;
use crate::config::FleetConfig;
use crate::error::{FleetError, RegistrationError, Result};
use crate::events::FleetEventBus;
use crate::locks::DroneLocks;
use crate::outcome::{LoadFill, LoadOutcome};
use drone_loading::{
    AllocationOutcome, CapacityAllocator, CargoFilter, DroneStateMachine, EligibilityGate,
    FilterResult, LoadEvent, WeightExceededPolicy,
};
use drone_registry::DroneRegistry;
use drone_types::{CargoItem, Drone, FleetEvent, FleetEventEnvelope, LoadRequest, SerialNumber};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

/// Unified entry point for fleet operations
pub struct FleetCoordinator {
    /// External drone store
    registry: Arc<dyn DroneRegistry>,

    gate: EligibilityGate,

    filter: CargoFilter,

    allocator: CapacityAllocator,

    state_machine: DroneStateMachine,

    /// Per-serial exclusion for mutations
    locks: DroneLocks,

    events: FleetEventBus,
}

impl FleetCoordinator {
    pub(crate) fn new(
        registry: Arc<dyn DroneRegistry>,
        gate: EligibilityGate,
        filter: CargoFilter,
        state_machine: DroneStateMachine,
        events: FleetEventBus,
    ) -> Self {
        Self {
            registry,
            gate,
            filter,
            allocator: CapacityAllocator,
            state_machine,
            locks: DroneLocks::new(),
            events,
        }
    }

    pub fn builder() -> FleetCoordinatorBuilder {
        FleetCoordinatorBuilder::new()
    }

    /// Build a coordinator from configuration over the given registry
    pub fn from_config(registry: Arc<dyn DroneRegistry>, config: &FleetConfig) -> Result<Self> {
        FleetCoordinatorBuilder::from_config(config)?
            .with_registry(registry)
            .build()
    }

    pub fn eligibility_gate(&self) -> &EligibilityGate {
        &self.gate
    }

    pub fn weight_exceeded_policy(&self) -> WeightExceededPolicy {
        self.state_machine.policy()
    }

    /// Subscribe to fleet events
    pub fn subscribe_events(&self) -> broadcast::Receiver<FleetEventEnvelope> {
        self.events.subscribe()
    }

    // ========== Registration ==========

    /// Register (or re-register) a drone
    #[instrument(skip(self, drone), fields(serial_number = %drone.serial_number))]
    pub async fn register_drone(&self, drone: Drone) -> Result<Drone> {
        validate_registration(&drone)?;

        let _guard = self.locks.acquire(&drone.serial_number).await;
        let saved = self.registry.save(drone).await?;

        info!(
            model = ?saved.model,
            weight_limit = saved.weight_limit,
            battery = saved.battery_percentage,
            "Drone registered"
        );
        self.events.emit(FleetEvent::DroneRegistered {
            serial_number: saved.serial_number.clone(),
        });

        Ok(saved)
    }

    // ========== Loading ==========

    /// Load as much of the requested cargo as the drone can take.
    ///
    /// Business results come back as [`LoadOutcome`]; only an unknown serial
    /// or a collaborator failure is an error.
    #[instrument(
        skip(self, request),
        fields(serial_number = request.serial_number.as_deref().unwrap_or_default())
    )]
    pub async fn load_drone_with_cargo(&self, request: LoadRequest) -> Result<LoadOutcome> {
        let LoadRequest {
            serial_number,
            cargo,
        } = request;

        if cargo.as_ref().is_some_and(|c| c.is_empty()) {
            return Ok(LoadOutcome::NoCargo);
        }
        let (serial_number, cargo) = match (serial_number, cargo) {
            (Some(serial_number), Some(cargo)) => (serial_number, cargo),
            _ => return Ok(LoadOutcome::InvalidRequest),
        };
        if serial_number.is_empty() {
            return Ok(LoadOutcome::InvalidSerial);
        }
        let serial_number = SerialNumber::new(serial_number);

        let _guard = self.locks.acquire(&serial_number).await;
        let mut drone = self.find_drone(&serial_number).await?;

        if let Some(reason) = self.gate.ineligibility(&drone) {
            warn!(%reason, "Drone not available for loading");
            let outcome = LoadOutcome::DroneUnavailable {
                battery_percentage: drone.battery_percentage,
                state: drone.state,
            };
            return Ok(self.finish(&serial_number, outcome));
        }

        let FilterResult { accepted, rejected } = self.filter.filter_valid(cargo);
        for item in &rejected {
            self.events.emit(FleetEvent::CargoRejected {
                serial_number: serial_number.clone(),
                name: item.spec.name.clone(),
                code: item.spec.code.clone(),
                reason: item.reason_text(),
            });
        }
        if accepted.is_empty() {
            return Ok(self.finish(&serial_number, LoadOutcome::NoValidCargo { rejected }));
        }

        let previous = drone.state;
        self.transition(&mut drone, LoadEvent::BeginLoading)?;
        let mut drone = self.registry.save(drone).await?;

        let allocation = self.allocator.allocate(&drone, accepted);
        for skipped in &allocation.skipped {
            self.events.emit(FleetEvent::CargoSkipped {
                serial_number: serial_number.clone(),
                name: skipped.item.name.clone(),
                weight: skipped.item.weight,
                remaining: skipped.remaining,
            });
        }

        let fill = match allocation.outcome() {
            AllocationOutcome::FullyLoaded => Some(LoadFill::Full),
            AllocationOutcome::PartiallyLoaded => Some(LoadFill::Partial),
            AllocationOutcome::WeightExceeded => None,
        };
        let tier = allocation.tier;
        let skipped = allocation.skipped;

        let outcome = match fill {
            Some(fill) => {
                let count = allocation.selected.len();
                drone.attach_cargo(allocation.selected);
                debug_assert!(
                    drone.within_capacity(),
                    "allocator overran the weight limit of {}",
                    serial_number
                );
                let loaded: Vec<CargoItem> = drone.cargo()[drone.cargo().len() - count..].to_vec();

                self.transition(&mut drone, LoadEvent::CargoAttached)?;
                self.registry.save(drone).await?;

                LoadOutcome::Loaded {
                    fill,
                    tier,
                    loaded,
                    skipped,
                    rejected,
                }
            }
            None => {
                self.transition(&mut drone, LoadEvent::NothingLoaded { previous })?;
                let state = drone.state;
                self.registry.save(drone).await?;

                LoadOutcome::WeightExceeded {
                    state,
                    skipped,
                    rejected,
                }
            }
        };

        Ok(self.finish(&serial_number, outcome))
    }

    // ========== Queries ==========

    /// Snapshot of the cargo currently attached to a drone
    pub async fn list_cargo_for(&self, serial_number: &str) -> Result<Vec<CargoItem>> {
        let drone = self.find_drone(&SerialNumber::new(serial_number)).await?;
        Ok(drone.cargo().to_vec())
    }

    /// All drones the eligibility gate would let start loading
    pub async fn list_available_for_loading(&self) -> Result<Vec<Drone>> {
        let drones = self.registry.find_all().await?;
        Ok(drones
            .into_iter()
            .filter(|d| self.gate.can_accept_load(d))
            .collect())
    }

    /// Current battery percentage of a drone
    pub async fn battery_level_of(&self, serial_number: &str) -> Result<u8> {
        let drone = self.find_drone(&SerialNumber::new(serial_number)).await?;
        Ok(drone.battery_percentage)
    }

    /// Fetch the whole fleet on a separate task.
    ///
    /// Must be called from within a tokio runtime. A registry failure is
    /// returned as an error, never as an empty fleet.
    #[instrument(skip(self))]
    pub async fn list_all_drones(&self) -> Result<Vec<Drone>> {
        let registry = Arc::clone(&self.registry);
        let fetched = tokio::spawn(async move { registry.find_all().await }).await;

        let err = match fetched {
            Ok(Ok(drones)) => {
                debug!(count = drones.len(), "Fleet fetched");
                return Ok(drones);
            }
            Ok(Err(e)) => FleetError::from(e),
            Err(e) => FleetError::Internal(format!("fleet query task failed: {}", e)),
        };

        error!(error = %err, "Fleet query failed");
        self.events.emit(FleetEvent::FleetQueryFailed {
            reason: err.to_string(),
        });
        Err(err)
    }

    // ========== Internal Helpers ==========

    async fn find_drone(&self, serial_number: &SerialNumber) -> Result<Drone> {
        self.registry
            .find_by_id(serial_number)
            .await?
            .ok_or_else(|| FleetError::drone_not_found(serial_number))
    }

    fn transition(&self, drone: &mut Drone, event: LoadEvent) -> Result<()> {
        let transition = self.state_machine.apply(drone, event)?;
        if transition.changed() {
            debug!(from = %transition.from, to = %transition.to, "Drone state changed");
            self.events.emit(FleetEvent::StateChanged {
                serial_number: drone.serial_number.clone(),
                from: transition.from,
                to: transition.to,
            });
        }
        Ok(())
    }

    fn finish(&self, serial_number: &SerialNumber, outcome: LoadOutcome) -> LoadOutcome {
        info!(
            outcome = ?outcome.kind(),
            loaded_items = outcome.loaded().len(),
            "Load attempt finished"
        );
        self.events.emit(FleetEvent::LoadCompleted {
            serial_number: serial_number.clone(),
            outcome: outcome.to_string(),
            loaded_items: outcome.loaded().len(),
        });
        outcome
    }
}

fn validate_registration(drone: &Drone) -> std::result::Result<(), RegistrationError> {
    let serial = &drone.serial_number;
    if serial.is_empty() {
        return Err(RegistrationError::EmptySerial);
    }
    if serial.char_len() > SerialNumber::MAX_LEN {
        return Err(RegistrationError::SerialTooLong {
            len: serial.char_len(),
            max: SerialNumber::MAX_LEN,
        });
    }
    if drone.battery_percentage > 100 {
        return Err(RegistrationError::BatteryOutOfRange(drone.battery_percentage));
    }
    if !(drone.weight_limit.is_finite() && drone.weight_limit > 0.0) {
        return Err(RegistrationError::InvalidWeightLimit(drone.weight_limit));
    }
    if !drone.within_capacity() {
        return Err(RegistrationError::OverCapacity {
            loaded: drone.loaded_weight(),
            limit: drone.weight_limit,
        });
    }
    Ok(())
}
