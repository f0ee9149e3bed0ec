//! Strongly-typed identifiers for fleet entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Drone serial number, the registry key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Longest serial number the registry accepts
    pub const MAX_LEN: usize = 100;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SerialNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SerialNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for an accepted cargo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CargoItemId(Uuid);

impl CargoItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CargoItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cargo:{}", self.0)
    }
}
