//! dronectl - command-line interface for the drone fleet engine
//!
//! Operators use it to:
//! - Inspect the fleet, its battery levels and loaded cargo
//! - Find drones that can take on cargo
//! - Register drones and submit load requests
//!
//! The fleet lives in a JSON manifest (`--fleet`). Commands that change it
//! write the manifest back unless `--dry-run` is given.

use clap::{Parser, Subcommand};
use drone_fleet::{FleetConfig, FleetCoordinator};
use drone_registry::InMemoryDroneRegistry;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod manifest;
mod output;

use commands::{drone, load};
pub use error::{CliError, CliResult};
use manifest::FleetManifest;
use output::OutputFormat;

/// dronectl application
#[derive(Parser)]
#[command(name = "dronectl")]
#[command(about = "Drone fleet loading and state CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DRONECTL_CONFIG")]
    config: Option<String>,

    /// Fleet manifest (JSON)
    #[arg(short, long, env = "DRONECTL_FLEET", default_value = "fleet.json")]
    fleet: PathBuf,

    /// Output format (table, json)
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Log level, overrides the configuration file
    #[arg(long, env = "DRONECTL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Do not write changes back to the fleet manifest
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// List every registered drone
    List,

    /// List drones that can accept cargo
    Available,

    /// Show the battery level of a drone
    Battery {
        /// Drone serial number
        serial_number: String,
    },

    /// List the cargo loaded on a drone
    Cargo {
        /// Drone serial number
        serial_number: String,
    },

    /// Load cargo onto a drone
    Load {
        /// Load request file (JSON)
        request: PathBuf,
    },

    /// Register or replace a drone
    Register {
        /// Drone description file (JSON)
        drone: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

impl Commands {
    fn mutates_fleet(&self) -> bool {
        matches!(self, Commands::Load { .. } | Commands::Register { .. })
    }
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Load configuration
    let config =
        FleetConfig::load(cli.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;

    init_tracing(
        cli.log_level.as_deref().unwrap_or(&config.logging.level),
        cli.json_logs || config.logging.json,
    );

    if let Commands::Config = cli.command {
        println!("Fleet: {}", cli.fleet.display());
        println!("Config: {:#?}", config);
        return Ok(());
    }

    let coordinator =
        FleetCoordinator::from_config(Arc::new(InMemoryDroneRegistry::new()), &config)?;
    watch_events(&coordinator);
    seed_fleet(&coordinator, &cli.fleet).await?;

    match &cli.command {
        Commands::List => drone::list(&coordinator, cli.output).await?,
        Commands::Available => drone::available(&coordinator, cli.output).await?,
        Commands::Battery { serial_number } => {
            drone::battery(&coordinator, serial_number, cli.output).await?
        }
        Commands::Cargo { serial_number } => {
            drone::cargo(&coordinator, serial_number, cli.output).await?
        }
        Commands::Load { request } => load::execute(&coordinator, request, cli.output).await?,
        Commands::Register { drone } => drone::register(&coordinator, drone, cli.output).await?,
        Commands::Config => {}
    }

    if cli.command.mutates_fleet() && !cli.dry_run {
        let drones = coordinator.list_all_drones().await?;
        FleetManifest::from_drones(&drones).write(&cli.fleet)?;
        debug!(path = %cli.fleet.display(), drones = drones.len(), "Fleet manifest written");
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays parseable
fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.to_string().into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let _ = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

/// Register every drone in the manifest
async fn seed_fleet(coordinator: &FleetCoordinator, path: &Path) -> CliResult<()> {
    let manifest = FleetManifest::read(path)?;
    let count = manifest.drones.len();
    for entry in manifest.drones {
        coordinator.register_drone(entry.into_drone()).await?;
    }
    info!(path = %path.display(), drones = count, "Fleet loaded");
    Ok(())
}

/// Forward fleet events to the log
fn watch_events(coordinator: &FleetCoordinator) {
    let mut events = coordinator.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(envelope) => debug!(
                    event_id = %envelope.id,
                    severity = ?envelope.severity,
                    event = ?envelope.event,
                    "Fleet event"
                ),
                Err(RecvError::Lagged(missed)) => warn!(missed, "Fleet event watcher lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}
