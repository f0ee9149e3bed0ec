//! Cargo types
//!
//! A [`CargoSpec`] is what a client proposes. It becomes a [`CargoItem`] once
//! it passes the cargo filter.

use crate::{CargoItemId, SerialNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed cargo item as submitted in a load request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoSpec {
    pub name: String,

    /// Weight in grams
    pub weight: f64,

    pub code: String,

    /// Optional image reference (URL or storage key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CargoSpec {
    pub fn new(name: impl Into<String>, weight: f64, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            code: code.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// An accepted cargo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub id: CargoItemId,

    pub name: String,

    /// Weight in grams
    pub weight: f64,

    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Owning drone, set when attached
    #[serde(default)]
    pub drone: Option<SerialNumber>,

    #[serde(default)]
    pub attached_at: Option<DateTime<Utc>>,
}

impl CargoItem {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        code: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: CargoItemId::generate(),
            name: name.into(),
            weight,
            code: code.into(),
            image,
            drone: None,
            attached_at: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.drone.is_some()
    }
}

impl From<CargoSpec> for CargoItem {
    fn from(spec: CargoSpec) -> Self {
        CargoItem::new(spec.name, spec.weight, spec.code, spec.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_spec_is_unattached() {
        let spec = CargoSpec::new("Aspirin", 12.5, "ASP_01").with_image("img/asp.png");
        let item = CargoItem::from(spec);

        assert_eq!(item.name, "Aspirin");
        assert_eq!(item.weight, 12.5);
        assert_eq!(item.image.as_deref(), Some("img/asp.png"));
        assert!(!item.is_attached());
    }

    #[test]
    fn test_spec_image_is_optional_on_the_wire() {
        let spec: CargoSpec =
            serde_json::from_str(r#"{"name":"Gauze","weight":5.0,"code":"GZ_2"}"#).unwrap();
        assert!(spec.image.is_none());
    }
}
