//! Per-drone mutual exclusion
//!
//! Every mutating operation on a serial holds that serial's lock from the
//! registry read to the last registry write, so two loads on one drone cannot
//! both plan against the same stale weight.
//!
//! An entry lives only while someone holds or waits for it. Releasing the last
//! guard removes it, so the table tracks in-flight work, not every serial ever
//! requested.

use dashmap::DashMap;
use drone_types::SerialNumber;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<SerialNumber, Arc<Mutex<()>>>;

/// Lock table keyed by serial number
#[derive(Debug, Default)]
pub struct DroneLocks {
    locks: Arc<LockTable>,
}

impl DroneLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one drone
    pub async fn acquire(&self, serial_number: &SerialNumber) -> DroneLockGuard {
        let lock = self
            .locks
            .entry(serial_number.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        DroneLockGuard {
            serial_number: serial_number.clone(),
            locks: Arc::clone(&self.locks),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of serials currently held or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one drone; released on drop
#[derive(Debug)]
pub struct DroneLockGuard {
    serial_number: SerialNumber,
    locks: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for DroneLockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the table's own handle left: nobody holds or waits for it
        self.locks.remove_if(&self.serial_number, |_, lock| Arc::strong_count(lock) == 1);
    }
}
