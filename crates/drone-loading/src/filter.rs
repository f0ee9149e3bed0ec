//! Cargo filter
//!
//! Evaluates every proposed item independently and keeps the survivors in
//! submitted order, since the greedy allocation pass depends on that order.

use crate::validator::CargoValidator;
use drone_types::{CargoItem, CargoSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Why a proposed item was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidName,
    InvalidCode,
    /// Weight is not a finite positive number
    InvalidWeight,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::InvalidName => "invalid name",
            RejectReason::InvalidCode => "invalid code",
            RejectReason::InvalidWeight => "invalid weight",
        };
        f.write_str(s)
    }
}

/// A proposed item that failed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCargo {
    pub spec: CargoSpec,
    pub reasons: Vec<RejectReason>,
}

impl RejectedCargo {
    /// Reasons joined for logs and events
    pub fn reason_text(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of filtering one request's cargo
#[derive(Debug, Clone, Default)]
pub struct FilterResult {
    /// Accepted items, in submitted order
    pub accepted: Vec<CargoItem>,
    pub rejected: Vec<RejectedCargo>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Drops proposed cargo that fails the validator
#[derive(Clone)]
pub struct CargoFilter {
    validator: Arc<dyn CargoValidator>,
}

impl CargoFilter {
    pub fn new(validator: Arc<dyn CargoValidator>) -> Self {
        Self { validator }
    }

    pub fn filter_valid(&self, specs: Vec<CargoSpec>) -> FilterResult {
        let mut result = FilterResult::default();

        for spec in specs {
            let reasons = self.check(&spec);
            if reasons.is_empty() {
                result.accepted.push(CargoItem::from(spec));
            } else {
                info!(
                    name = %spec.name,
                    code = %spec.code,
                    reasons = ?reasons,
                    "Filtered out cargo with incorrect name or code"
                );
                result.rejected.push(RejectedCargo { spec, reasons });
            }
        }

        result
    }

    fn check(&self, spec: &CargoSpec) -> Vec<RejectReason> {
        let mut reasons = Vec::new();
        if !self.validator.is_valid_name(&spec.name) {
            reasons.push(RejectReason::InvalidName);
        }
        if !self.validator.is_valid_code(&spec.code) {
            reasons.push(RejectReason::InvalidCode);
        }
        if !(spec.weight.is_finite() && spec.weight > 0.0) {
            reasons.push(RejectReason::InvalidWeight);
        }
        reasons
    }
}

impl Default for CargoFilter {
    fn default() -> Self {
        Self::new(Arc::new(crate::validator::PatternValidator::default()))
    }
}

impl fmt::Debug for CargoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CargoFilter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts names without digits and any non-empty code
    struct NoDigitsValidator;

    impl CargoValidator for NoDigitsValidator {
        fn is_valid_name(&self, name: &str) -> bool {
            !name.chars().any(|c| c.is_ascii_digit())
        }

        fn is_valid_code(&self, code: &str) -> bool {
            !code.is_empty()
        }
    }

    #[test]
    fn test_filter_is_stable() {
        let filter = CargoFilter::default();
        let result = filter.filter_valid(vec![
            CargoSpec::new("first", 1.0, "A1"),
            CargoSpec::new("bad name", 1.0, "B1"),
            CargoSpec::new("second", 2.0, "C1"),
            CargoSpec::new("third", 3.0, "lower"),
            CargoSpec::new("fourth", 4.0, "D1"),
        ]);

        let names: Vec<_> = result.accepted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "fourth"]);
        assert_eq!(result.rejected.len(), 2);
        assert_eq!(result.rejected[0].reasons, vec![RejectReason::InvalidName]);
        assert_eq!(result.rejected[1].reasons, vec![RejectReason::InvalidCode]);
    }

    #[test]
    fn test_all_reasons_are_collected() {
        let filter = CargoFilter::default();
        let result = filter.filter_valid(vec![CargoSpec::new("no good", -1.0, "nope")]);

        assert!(result.is_empty());
        assert_eq!(
            result.rejected[0].reasons,
            vec![
                RejectReason::InvalidName,
                RejectReason::InvalidCode,
                RejectReason::InvalidWeight
            ]
        );
        assert_eq!(
            result.rejected[0].reason_text(),
            "invalid name, invalid code, invalid weight"
        );
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let filter = CargoFilter::default();
        let result = filter.filter_valid(vec![
            CargoSpec::new("ok", f64::NAN, "OK"),
            CargoSpec::new("ok", f64::INFINITY, "OK"),
            CargoSpec::new("ok", 0.0, "OK"),
        ]);
        assert!(result.is_empty());
        assert_eq!(result.rejected.len(), 3);
    }

    #[test]
    fn test_injected_validator_is_used() {
        let filter = CargoFilter::new(Arc::new(NoDigitsValidator));
        let result = filter.filter_valid(vec![
            CargoSpec::new("lower case name", 1.0, "any-code"),
            CargoSpec::new("vitamin b12", 1.0, "B12"),
        ]);
        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.accepted[0].name, "lower case name");
    }
}
