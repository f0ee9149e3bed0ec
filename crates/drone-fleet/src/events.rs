//! Fleet event bus
//!
//! Broadcasts registration and load activity to any number of subscribers.
//! Publishing never fails an operation; with no subscribers events are dropped.

use drone_types::{FleetEvent, FleetEventEnvelope};
use tokio::sync::broadcast;
use tracing::debug;

/// Default channel capacity for the event stream
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct FleetEventBus {
    tx: broadcast::Sender<FleetEventEnvelope>,
}

impl FleetEventBus {
    /// Create a bus; a zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FleetEventEnvelope> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn emit(&self, event: FleetEvent) {
        let envelope = FleetEventEnvelope::new(event);
        debug!(event_id = %envelope.id, severity = ?envelope.severity, "Publishing fleet event");
        let _ = self.tx.send(envelope);
    }
}

impl Default for FleetEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_types::SerialNumber;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let bus = FleetEventBus::default();
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(FleetEvent::DroneRegistered {
            serial_number: SerialNumber::new("DRN-1"),
        });

        let envelope = rx.recv().await.unwrap();
        assert!(matches!(envelope.event, FleetEvent::DroneRegistered { .. }));
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = FleetEventBus::new(0);
        bus.emit(FleetEvent::FleetQueryFailed {
            reason: "nobody listening".into(),
        });
    }
}
