//! Event types for fleet observability
//!
//! Events provide a unified stream of registration and loading activity.

use crate::{DroneStatus, SerialNumber};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all fleet events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetEventEnvelope {
    /// Unique event ID
    pub id: Uuid,

    /// Event timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Event severity
    pub severity: EventSeverity,

    /// The actual event
    pub event: FleetEvent,
}

/// Event severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Fleet events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FleetEvent {
    /// Drone registered or re-registered
    DroneRegistered { serial_number: SerialNumber },

    /// Proposed cargo dropped by the cargo filter
    CargoRejected {
        serial_number: SerialNumber,
        name: String,
        code: String,
        reason: String,
    },

    /// Cargo skipped by the greedy pass because the weight budget ran out
    CargoSkipped {
        serial_number: SerialNumber,
        name: String,
        weight: f64,
        remaining: f64,
    },

    /// Drone changed operational state
    StateChanged {
        serial_number: SerialNumber,
        from: DroneStatus,
        to: DroneStatus,
    },

    /// A load attempt finished with the given outcome
    LoadCompleted {
        serial_number: SerialNumber,
        outcome: String,
        loaded_items: usize,
    },

    /// The bulk fleet query failed
    FleetQueryFailed { reason: String },
}

impl FleetEventEnvelope {
    /// Create a new event envelope
    pub fn new(event: FleetEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            severity: Self::infer_severity(&event),
            event,
        }
    }

    /// Override the inferred severity
    pub fn with_severity(mut self, severity: EventSeverity) -> Self {
        self.severity = severity;
        self
    }

    fn infer_severity(event: &FleetEvent) -> EventSeverity {
        match event {
            FleetEvent::FleetQueryFailed { .. } => EventSeverity::Error,
            FleetEvent::CargoRejected { .. } | FleetEvent::CargoSkipped { .. } => {
                EventSeverity::Warning
            }
            FleetEvent::StateChanged { .. } => EventSeverity::Debug,
            _ => EventSeverity::Info,
        }
    }
}
