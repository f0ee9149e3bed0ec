//! Concurrent loads against one drone must not overshoot its capacity

use drone_fleet::{FleetCoordinator, LoadOutcome, OutcomeKind};
use drone_loading::WeightExceededPolicy;
use drone_registry::InMemoryDroneRegistry;
use drone_types::{CargoSpec, Drone, DroneModel, DroneStatus, LoadRequest};
use std::sync::Arc;

async fn coordinator_with_drone(limit: f64) -> Arc<FleetCoordinator> {
    let coordinator = FleetCoordinator::builder()
        .with_registry(Arc::new(InMemoryDroneRegistry::new()))
        .build()
        .unwrap();
    coordinator
        .register_drone(Drone::new("DRN-1", DroneModel::Heavyweight, limit, 100, DroneStatus::Idle))
        .await
        .unwrap();
    Arc::new(coordinator)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_loads_cannot_both_succeed() {
    for _ in 0..25 {
        let coordinator = coordinator_with_drone(100.0).await;

        let a = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                coordinator
                    .load_drone_with_cargo(LoadRequest::new(
                        "DRN-1",
                        vec![CargoSpec::new("a", 70.0, "A")],
                    ))
                    .await
            })
        };
        let b = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                coordinator
                    .load_drone_with_cargo(LoadRequest::new(
                        "DRN-1",
                        vec![CargoSpec::new("b", 60.0, "B")],
                    ))
                    .await
            })
        };

        let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];
        let loaded = outcomes.iter().filter(|o| o.is_loaded()).count();
        assert_eq!(loaded, 1, "outcomes: {:?}", outcomes);

        // The loser saw a LOADED drone and was turned away
        let loser = outcomes.iter().find(|o| !o.is_loaded()).unwrap();
        assert_eq!(loser.kind(), OutcomeKind::DroneUnavailable);

        let drone = &coordinator.list_all_drones().await.unwrap()[0];
        assert!(drone.within_capacity());
        assert_eq!(drone.cargo().len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reentrant_loading_under_contention_keeps_invariant() {
    // A drone already in LOADING is eligible; whichever load wins closes the
    // gate for the rest
    let coordinator = Arc::new(
        FleetCoordinator::builder()
            .with_registry(Arc::new(InMemoryDroneRegistry::new()))
            .with_weight_exceeded_policy(WeightExceededPolicy::StayLoading)
            .build()
            .unwrap(),
    );
    coordinator
        .register_drone(Drone::new(
            "DRN-1",
            DroneModel::Heavyweight,
            100.0,
            100,
            DroneStatus::Loading,
        ))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                coordinator
                    .load_drone_with_cargo(LoadRequest::new(
                        "DRN-1",
                        vec![CargoSpec::new(format!("item-{}", i), 30.0, "ITEM")],
                    ))
                    .await
            })
        })
        .collect();

    let mut outcomes: Vec<LoadOutcome> = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }

    let drone = &coordinator.list_all_drones().await.unwrap()[0];
    assert!(drone.within_capacity());
    assert_eq!(drone.state, DroneStatus::Loaded);
    assert_eq!(outcomes.iter().filter(|o| o.is_loaded()).count(), 1);
    assert_eq!(drone.cargo().len(), 1);
}
