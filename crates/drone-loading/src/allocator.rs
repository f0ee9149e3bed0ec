//! Capacity allocator
//!
//! Three tiers, evaluated in order:
//!
//! 1. **Empty fit**: an empty drone whose limit covers the whole request
//!    takes everything.
//! 2. **Spare capacity**: if the remaining capacity is strictly greater than
//!    the request, everything is taken. A request exactly equal to the
//!    remaining capacity falls through to tier 3.
//! 3. **Greedy fit**: one pass in submitted order; an item is taken if it fits
//!    in what is left, otherwise skipped for good. No reordering and no
//!    backtracking, so this is not an optimal knapsack.
//!
//! Every comparison allows [`WEIGHT_TOLERANCE`] of slack, the same slack
//! [`Drone::within_capacity`] allows, so a selection judged to fit here always
//! passes the drone's own capacity check.

use drone_types::{CargoItem, Drone, WEIGHT_TOLERANCE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which allocation policy produced the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationTier {
    EmptyFit,
    SpareCapacity,
    GreedyFit,
}

/// Business classification of an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOutcome {
    FullyLoaded,
    PartiallyLoaded,
    WeightExceeded,
}

/// An item the greedy pass could not fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCargo {
    pub item: CargoItem,
    /// Capacity left when the item was considered
    pub remaining: f64,
}

/// Result of one allocation
#[derive(Debug, Clone)]
pub struct Allocation {
    pub tier: AllocationTier,
    /// Items to attach, in submitted order
    pub selected: Vec<CargoItem>,
    pub skipped: Vec<SkippedCargo>,
}

impl Allocation {
    fn all(tier: AllocationTier, items: Vec<CargoItem>) -> Self {
        Self {
            tier,
            selected: items,
            skipped: Vec::new(),
        }
    }

    pub fn outcome(&self) -> AllocationOutcome {
        match self.tier {
            AllocationTier::EmptyFit | AllocationTier::SpareCapacity => {
                AllocationOutcome::FullyLoaded
            }
            AllocationTier::GreedyFit if self.selected.is_empty() => {
                AllocationOutcome::WeightExceeded
            }
            AllocationTier::GreedyFit => AllocationOutcome::PartiallyLoaded,
        }
    }

    pub fn selected_weight(&self) -> f64 {
        self.selected.iter().map(|c| c.weight).sum()
    }
}

/// Selects the loadable subset of validated cargo
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityAllocator;

impl CapacityAllocator {
    pub fn allocate(&self, drone: &Drone, items: Vec<CargoItem>) -> Allocation {
        let requested: f64 = items.iter().map(|c| c.weight).sum();

        if drone.is_empty() && requested <= drone.weight_limit + WEIGHT_TOLERANCE {
            return Allocation::all(AllocationTier::EmptyFit, items);
        }

        let mut available = drone.available_capacity();
        // Within tolerance of an exact fit counts as exact
        if available - requested > WEIGHT_TOLERANCE {
            return Allocation::all(AllocationTier::SpareCapacity, items);
        }

        let mut selected = Vec::new();
        let mut skipped = Vec::new();
        for item in items {
            if item.weight <= available + WEIGHT_TOLERANCE {
                available -= item.weight;
                selected.push(item);
            } else {
                info!(
                    serial_number = %drone.serial_number,
                    cargo = %item.name,
                    weight = item.weight,
                    remaining = available,
                    "Maximum weight reached"
                );
                skipped.push(SkippedCargo {
                    item,
                    remaining: available,
                });
            }
        }

        Allocation {
            tier: AllocationTier::GreedyFit,
            selected,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_types::{DroneModel, DroneStatus};

    fn item(name: &str, weight: f64) -> CargoItem {
        CargoItem::new(name, weight, "CODE", None)
    }

    fn drone(limit: f64, loaded: &[f64]) -> Drone {
        Drone::new("DRN-1", DroneModel::Heavyweight, limit, 100, DroneStatus::Loading)
            .with_cargo(loaded.iter().map(|w| item("preloaded", *w)).collect())
    }

    fn names(items: &[CargoItem]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_drone_takes_everything_that_fits() {
        let allocation = CapacityAllocator.allocate(
            &drone(500.0, &[]),
            vec![item("a", 200.0), item("b", 300.0)],
        );
        assert_eq!(allocation.tier, AllocationTier::EmptyFit);
        assert_eq!(allocation.outcome(), AllocationOutcome::FullyLoaded);
        assert_eq!(allocation.selected.len(), 2);
    }

    #[test]
    fn test_spare_capacity_path() {
        let allocation = CapacityAllocator.allocate(
            &drone(500.0, &[100.0]),
            vec![item("a", 150.0), item("b", 149.0)],
        );
        assert_eq!(allocation.tier, AllocationTier::SpareCapacity);
        assert_eq!(allocation.outcome(), AllocationOutcome::FullyLoaded);
    }

    #[test]
    fn test_exact_fit_falls_through_to_greedy() {
        // 400 available, 400 requested: the strict inequality fails
        let allocation = CapacityAllocator.allocate(
            &drone(500.0, &[100.0]),
            vec![item("a", 250.0), item("b", 150.0)],
        );
        assert_eq!(allocation.tier, AllocationTier::GreedyFit);
        assert_eq!(allocation.outcome(), AllocationOutcome::PartiallyLoaded);
        assert_eq!(names(&allocation.selected), vec!["a", "b"]);
        assert!(allocation.skipped.is_empty());
        assert_eq!(allocation.selected_weight(), 400.0);
    }

    #[test]
    fn test_exact_fit_on_empty_drone_uses_empty_fit() {
        let allocation = CapacityAllocator.allocate(
            &drone(500.0, &[]),
            vec![item("a", 250.0), item("b", 250.0)],
        );
        assert_eq!(allocation.tier, AllocationTier::EmptyFit);
    }

    #[test]
    fn test_greedy_is_order_sensitive() {
        // 10 available
        let loaded = drone(20.0, &[10.0]);

        let allocation = CapacityAllocator.allocate(
            &loaded,
            vec![item("six", 6.0), item("five", 5.0), item("four", 4.0)],
        );
        assert_eq!(allocation.outcome(), AllocationOutcome::PartiallyLoaded);
        assert_eq!(names(&allocation.selected), vec!["six", "four"]);
        assert_eq!(allocation.skipped.len(), 1);
        assert_eq!(allocation.skipped[0].item.name, "five");
        assert_eq!(allocation.skipped[0].remaining, 4.0);

        let reordered = CapacityAllocator.allocate(
            &loaded,
            vec![item("five", 5.0), item("four", 4.0), item("six", 6.0)],
        );
        assert_eq!(names(&reordered.selected), vec!["five", "four"]);
        assert_ne!(names(&allocation.selected), names(&reordered.selected));
    }

    #[test]
    fn test_nothing_fits() {
        let allocation = CapacityAllocator.allocate(
            &drone(100.0, &[90.0]),
            vec![item("a", 20.0), item("b", 11.0)],
        );
        assert_eq!(allocation.outcome(), AllocationOutcome::WeightExceeded);
        assert!(allocation.selected.is_empty());
        assert_eq!(allocation.skipped.len(), 2);
    }

    #[test]
    fn test_oversized_request_on_empty_drone_goes_greedy() {
        let allocation = CapacityAllocator.allocate(
            &drone(100.0, &[]),
            vec![item("big", 120.0), item("small", 30.0), item("mid", 60.0), item("tiny", 20.0)],
        );
        assert_eq!(allocation.tier, AllocationTier::GreedyFit);
        assert_eq!(names(&allocation.selected), vec!["small", "mid"]);
        assert!(allocation.selected_weight() <= 100.0);
    }

    #[test]
    fn test_fractional_selection_passes_drone_capacity_check() {
        let cases: [(f64, &[f64], &[f64]); 2] = [
            (1.51, &[0.21], &[0.9, 0.4]),
            (1.8, &[0.6], &[0.5, 0.1, 0.6]),
        ];

        for (limit, loaded, requested) in cases {
            let mut target = drone(limit, loaded);
            let items = requested.iter().map(|w| item("part", *w)).collect();

            let allocation = CapacityAllocator.allocate(&target, items);
            assert_eq!(allocation.selected.len(), requested.len());

            target.attach_cargo(allocation.selected);
            assert!(target.within_capacity(), "limit {} overrun", limit);
        }
    }

    #[test]
    fn test_rounding_level_exact_fit_is_still_exact() {
        // 1.8 - 0.6 is 1.2000000000000002 while 0.5 + 0.1 + 0.6 is 1.2
        let allocation = CapacityAllocator.allocate(
            &drone(1.8, &[0.6]),
            vec![item("a", 0.5), item("b", 0.1), item("c", 0.6)],
        );
        assert_eq!(allocation.tier, AllocationTier::GreedyFit);
        assert_eq!(allocation.outcome(), AllocationOutcome::PartiallyLoaded);
        assert!(allocation.skipped.is_empty());
    }
}
