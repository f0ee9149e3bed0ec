//! Configuration for the fleet coordinator
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! configuration file, then `DRONES_`-prefixed environment variables with `__`
//! separating sections (for example `DRONES_LOADING__MIN_BATTERY_PERCENTAGE=30`).

use crate::events::DEFAULT_EVENT_CHANNEL_CAPACITY;
use drone_loading::{
    WeightExceededPolicy, DEFAULT_CODE_PATTERN, DEFAULT_NAME_PATTERN, MIN_LOAD_BATTERY,
};
use serde::{Deserialize, Serialize};

/// Main fleet configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Load policy
    #[serde(default)]
    pub loading: LoadingConfig,

    /// Cargo validation rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Event stream configuration
    #[serde(default)]
    pub events: EventsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Minimum battery percentage to accept cargo
    #[serde(default = "default_min_battery")]
    pub min_battery_percentage: u8,

    /// State handling when nothing fits
    #[serde(default)]
    pub weight_exceeded_policy: WeightExceededPolicy,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_battery_percentage: MIN_LOAD_BATTERY,
            weight_exceeded_policy: WeightExceededPolicy::default(),
        }
    }
}

/// Cargo validation patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,

    #[serde(default = "default_code_pattern")]
    pub code_pattern: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_pattern: default_name_pattern(),
            code_pattern: default_code_pattern(),
        }
    }
}

/// Event stream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_min_battery() -> u8 {
    MIN_LOAD_BATTERY
}

fn default_name_pattern() -> String {
    DEFAULT_NAME_PATTERN.to_string()
}

fn default_code_pattern() -> String {
    DEFAULT_CODE_PATTERN.to_string()
}

fn default_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl FleetConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&FleetConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with DRONES_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("DRONES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
