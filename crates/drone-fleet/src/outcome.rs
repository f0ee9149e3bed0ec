//! Load outcomes
//!
//! Ordinary business results of a load attempt. Callers branch on the variant
//! (or on [`OutcomeKind`]); the `Display` text is for people.

use drone_loading::{AllocationTier, RejectedCargo, SkippedCargo};
use drone_types::{CargoItem, DroneStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of the valid cargo was loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFill {
    /// Taken whole by the empty-fit or spare-capacity tier
    Full,
    /// Selected item by item by the greedy pass
    Partial,
}

/// Fieldless classification of a [`LoadOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    NoCargo,
    InvalidRequest,
    InvalidSerial,
    DroneUnavailable,
    NoValidCargo,
    FullyLoaded,
    PartiallyLoaded,
    WeightExceeded,
}

/// Result of one load attempt
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The request carried an empty cargo list
    NoCargo,

    /// Serial number or cargo list missing from the request
    InvalidRequest,

    /// Serial number present but empty
    InvalidSerial,

    /// Battery too low or drone busy
    DroneUnavailable {
        battery_percentage: u8,
        state: DroneStatus,
    },

    /// Every proposed item failed validation
    NoValidCargo { rejected: Vec<RejectedCargo> },

    /// Some or all valid cargo was attached
    Loaded {
        fill: LoadFill,
        tier: AllocationTier,
        loaded: Vec<CargoItem>,
        skipped: Vec<SkippedCargo>,
        rejected: Vec<RejectedCargo>,
    },

    /// Nothing fitted; `state` is where the drone was left
    WeightExceeded {
        state: DroneStatus,
        skipped: Vec<SkippedCargo>,
        rejected: Vec<RejectedCargo>,
    },
}

impl LoadOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            LoadOutcome::NoCargo => OutcomeKind::NoCargo,
            LoadOutcome::InvalidRequest => OutcomeKind::InvalidRequest,
            LoadOutcome::InvalidSerial => OutcomeKind::InvalidSerial,
            LoadOutcome::DroneUnavailable { .. } => OutcomeKind::DroneUnavailable,
            LoadOutcome::NoValidCargo { .. } => OutcomeKind::NoValidCargo,
            LoadOutcome::Loaded {
                fill: LoadFill::Full,
                ..
            } => OutcomeKind::FullyLoaded,
            LoadOutcome::Loaded {
                fill: LoadFill::Partial,
                ..
            } => OutcomeKind::PartiallyLoaded,
            LoadOutcome::WeightExceeded { .. } => OutcomeKind::WeightExceeded,
        }
    }

    /// Whether any cargo was attached
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Items attached by this attempt
    pub fn loaded(&self) -> &[CargoItem] {
        match self {
            LoadOutcome::Loaded { loaded, .. } => loaded,
            _ => &[],
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::NoCargo => "No cargo to be loaded",
            OutcomeKind::InvalidRequest => "Wrong details provided",
            OutcomeKind::InvalidSerial => "Invalid serial number",
            OutcomeKind::DroneUnavailable => "Drone not available for loading",
            OutcomeKind::NoValidCargo => "Provided cargo has incorrect name or code",
            OutcomeKind::FullyLoaded => "Cargo fully loaded",
            OutcomeKind::PartiallyLoaded => "Cargo partially loaded",
            OutcomeKind::WeightExceeded => "Weight exceeded",
        };
        f.write_str(s)
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}
