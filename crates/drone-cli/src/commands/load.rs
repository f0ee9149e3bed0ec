//! Load command

use crate::error::CliResult;
use crate::manifest;
use crate::output::{self, print_success, print_warning, OutputFormat};
use drone_fleet::{FleetCoordinator, LoadOutcome};
use drone_loading::{RejectedCargo, SkippedCargo};
use drone_types::LoadRequest;
use std::path::Path;

use super::drone::CargoRow;

/// Submit the load request in `path`
pub async fn execute(
    coordinator: &FleetCoordinator,
    path: &Path,
    format: OutputFormat,
) -> CliResult<()> {
    let request: LoadRequest = manifest::read_json(path)?;
    let outcome = coordinator.load_drone_with_cargo(request).await?;

    match format {
        OutputFormat::Json => output::print_json(&outcome),
        OutputFormat::Table => print_outcome(&outcome),
    }
}

fn print_outcome(outcome: &LoadOutcome) -> CliResult<()> {
    match outcome {
        LoadOutcome::Loaded {
            loaded,
            skipped,
            rejected,
            ..
        } => {
            print_success(&outcome.to_string());
            output::print_output(loaded.iter().map(CargoRow::from).collect(), OutputFormat::Table)?;
            print_skipped(skipped);
            print_rejected(rejected);
        }
        LoadOutcome::WeightExceeded {
            state,
            skipped,
            rejected,
        } => {
            print_warning(&format!("{} (drone left {})", outcome, state));
            print_skipped(skipped);
            print_rejected(rejected);
        }
        LoadOutcome::DroneUnavailable {
            battery_percentage,
            state,
        } => {
            print_warning(&format!(
                "{} (battery {}%, state {})",
                outcome, battery_percentage, state
            ));
        }
        LoadOutcome::NoValidCargo { rejected } => {
            print_warning(&outcome.to_string());
            print_rejected(rejected);
        }
        LoadOutcome::NoCargo | LoadOutcome::InvalidRequest | LoadOutcome::InvalidSerial => {
            print_warning(&outcome.to_string());
        }
    }
    Ok(())
}

fn print_skipped(skipped: &[SkippedCargo]) {
    for s in skipped {
        println!(
            "  skipped {} ({}g, {}g left)",
            s.item.name, s.item.weight, s.remaining
        );
    }
}

fn print_rejected(rejected: &[RejectedCargo]) {
    for r in rejected {
        println!("  rejected {}: {}", r.spec.name, r.reason_text());
    }
}
