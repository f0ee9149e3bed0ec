//! Load request types

use crate::CargoSpec;
use serde::{Deserialize, Serialize};

/// A request to load cargo onto a drone.
///
/// Both fields are optional because the request arrives from outside and a
/// missing field is a reportable outcome, not a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(default)]
    pub serial_number: Option<String>,

    #[serde(default)]
    pub cargo: Option<Vec<CargoSpec>>,
}

impl LoadRequest {
    pub fn new(serial_number: impl Into<String>, cargo: Vec<CargoSpec>) -> Self {
        Self {
            serial_number: Some(serial_number.into()),
            cargo: Some(cargo),
        }
    }
}
