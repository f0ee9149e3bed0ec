//! Drone commands: registration and fleet queries

use crate::error::CliResult;
use crate::manifest::{self, DroneEntry};
use crate::output::{self, print_success, OutputFormat};
use drone_fleet::FleetCoordinator;
use drone_types::{CargoItem, Drone};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Table row for drone display
#[derive(Debug, Serialize, Tabled)]
pub struct DroneRow {
    serial: String,
    model: String,
    limit: f64,
    loaded: f64,
    battery: String,
    state: String,
}

impl From<&Drone> for DroneRow {
    fn from(d: &Drone) -> Self {
        Self {
            serial: d.serial_number.to_string(),
            model: format!("{:?}", d.model),
            limit: d.weight_limit,
            loaded: d.loaded_weight(),
            battery: format!("{}%", d.battery_percentage),
            state: d.state.to_string(),
        }
    }
}

/// Table row for cargo display
#[derive(Debug, Serialize, Tabled)]
pub struct CargoRow {
    id: String,
    name: String,
    weight: f64,
    code: String,
}

impl From<&CargoItem> for CargoRow {
    fn from(c: &CargoItem) -> Self {
        let id = c.id.to_string();
        Self {
            id: id.chars().take(14).collect(),
            name: c.name.clone(),
            weight: c.weight,
            code: c.code.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatteryLevel<'a> {
    serial_number: &'a str,
    battery_percentage: u8,
}

pub async fn list(coordinator: &FleetCoordinator, format: OutputFormat) -> CliResult<()> {
    let drones = coordinator.list_all_drones().await?;
    output::print_output(drones.iter().map(DroneRow::from).collect(), format)
}

pub async fn available(coordinator: &FleetCoordinator, format: OutputFormat) -> CliResult<()> {
    let drones = coordinator.list_available_for_loading().await?;
    output::print_output(drones.iter().map(DroneRow::from).collect(), format)
}

pub async fn battery(
    coordinator: &FleetCoordinator,
    serial_number: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let battery_percentage = coordinator.battery_level_of(serial_number).await?;
    match format {
        OutputFormat::Table => {
            println!("{}: {}%", serial_number, battery_percentage);
            Ok(())
        }
        OutputFormat::Json => output::print_json(&BatteryLevel {
            serial_number,
            battery_percentage,
        }),
    }
}

pub async fn cargo(
    coordinator: &FleetCoordinator,
    serial_number: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let cargo = coordinator.list_cargo_for(serial_number).await?;
    output::print_output(cargo.iter().map(CargoRow::from).collect(), format)
}

/// Register the drone described in `path`
pub async fn register(
    coordinator: &FleetCoordinator,
    path: &Path,
    format: OutputFormat,
) -> CliResult<()> {
    let entry: DroneEntry = manifest::read_json(path)?;
    let drone = coordinator.register_drone(entry.into_drone()).await?;

    match format {
        OutputFormat::Table => {
            print_success(&format!("Registered drone: {}", drone.serial_number));
            Ok(())
        }
        OutputFormat::Json => output::print_json(&drone),
    }
}
