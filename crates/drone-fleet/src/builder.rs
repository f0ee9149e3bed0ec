//! Builder for the fleet coordinator

use crate::config::FleetConfig;
use crate::coordinator::FleetCoordinator;
use crate::error::{FleetError, Result};
use crate::events::{FleetEventBus, DEFAULT_EVENT_CHANNEL_CAPACITY};
use drone_loading::{
    CargoFilter, CargoValidator, DroneStateMachine, EligibilityGate, PatternValidator,
    WeightExceededPolicy, MIN_LOAD_BATTERY,
};
use drone_registry::DroneRegistry;
use std::sync::Arc;

/// Assembles a [`FleetCoordinator`] from its collaborators
pub struct FleetCoordinatorBuilder {
    registry: Option<Arc<dyn DroneRegistry>>,
    validator: Option<Arc<dyn CargoValidator>>,
    min_battery: u8,
    weight_exceeded_policy: WeightExceededPolicy,
    event_capacity: usize,
}

impl FleetCoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            validator: None,
            min_battery: MIN_LOAD_BATTERY,
            weight_exceeded_policy: WeightExceededPolicy::default(),
            event_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }

    /// Start from a loaded configuration.
    ///
    /// Compiles the configured validation patterns; the registry still has to
    /// be supplied.
    pub fn from_config(config: &FleetConfig) -> Result<Self> {
        let validator = PatternValidator::new(
            &config.validation.name_pattern,
            &config.validation.code_pattern,
        )?;

        Ok(Self::new()
            .with_validator(Arc::new(validator))
            .with_min_battery(config.loading.min_battery_percentage)
            .with_weight_exceeded_policy(config.loading.weight_exceeded_policy)
            .with_event_capacity(config.events.channel_capacity))
    }

    pub fn with_registry(mut self, registry: Arc<dyn DroneRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn CargoValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_min_battery(mut self, min_battery: u8) -> Self {
        self.min_battery = min_battery;
        self
    }

    pub fn with_weight_exceeded_policy(mut self, policy: WeightExceededPolicy) -> Self {
        self.weight_exceeded_policy = policy;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<FleetCoordinator> {
        let registry = self
            .registry
            .ok_or_else(|| FleetError::Config("a drone registry is required".into()))?;
        let validator = self
            .validator
            .unwrap_or_else(|| Arc::new(PatternValidator::default()));

        Ok(FleetCoordinator::new(
            registry,
            EligibilityGate::new(self.min_battery),
            CargoFilter::new(validator),
            DroneStateMachine::new(self.weight_exceeded_policy),
            FleetEventBus::new(self.event_capacity),
        ))
    }
}

impl Default for FleetCoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
