//! Configuration structures for the appointment simulator
//!
//! This module contains the simulation configuration structure, the per-class
//! distribution parameters and the validation logic used to control the
//! arrival generator, the slot allocator and the metrics engine.

use super::{OutputFormat, RequestClass};
use crate::scheduling::BusinessHours;
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default parameters derived from one month of observed call data
pub mod defaults {
    /// Number of days to simulate
    pub const HORIZON_DAYS: usize = 30;

    /// Number of generated calls printed ahead of the report
    pub const PREVIEW_CALLS: usize = 20;

    /// Mean Class A calls per day (379 calls over 23 working days)
    pub const CLASS_A_MEAN_DAILY_CALLS: f64 = 379.0 / 23.0;

    /// Rate of the exponential gap between Class A calls (calls per hour)
    pub const CLASS_A_ARRIVAL_RATE: f64 = 1.833705;

    /// Mean Class A service duration (hours)
    pub const CLASS_A_DURATION_MEAN: f64 = 0.4327;

    /// Standard deviation of the Class A service duration (hours)
    pub const CLASS_A_DURATION_STD_DEV: f64 = 0.0978;

    /// Fixed slot length booked for Class A requests (35 minutes, in hours)
    pub const CLASS_A_SLOT_HOURS: f64 = 0.5833;

    /// Mean Class B calls per day (239 calls over 23 working days)
    pub const CLASS_B_MEAN_DAILY_CALLS: f64 = 239.0 / 23.0;

    /// Mean gap between Class B calls (hours)
    pub const CLASS_B_GAP_MEAN: f64 = 0.8666;

    /// Standard deviation of the gap between Class B calls (hours)
    pub const CLASS_B_GAP_STD_DEV: f64 = 0.31078;

    /// Shape of the Class B service duration gamma distribution
    pub const CLASS_B_DURATION_SHAPE: f64 = 12.5848;

    /// Scale of the Class B service duration gamma distribution (hours)
    ///
    /// The observed fit reports 0.0532 as the second gamma parameter. Read as
    /// a rate it gives scans of about 236 hours, so it is used as the scale.
    pub const CLASS_B_DURATION_SCALE: f64 = 0.0532;

    /// Fixed slot length booked for Class B requests (60 minutes, in hours)
    pub const CLASS_B_SLOT_HOURS: f64 = 1.0;

    /// Longest slot a class may book (hours)
    pub const MAX_SLOT_HOURS: f64 = 24.0;

    /// Upper bound on the mean and spread of the gap between calls (hours)
    pub const MAX_GAP_HOURS: f64 = 24.0;
}

/// A non-negative random quantity (hours) drawn from a parametric distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionSpec {
    /// Exponential distribution with the given rate (events per hour)
    Exponential {
        /// Rate parameter (lambda)
        rate: f64,
    },
    /// Normal distribution, clipped to zero when sampled
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation
        std_dev: f64,
    },
    /// Gamma distribution with shape/scale parameterisation
    Gamma {
        /// Shape parameter (k)
        shape: f64,
        /// Scale parameter (theta)
        scale: f64,
    },
}

impl DistributionSpec {
    /// Check the parameters are ones the sampler can be built from
    pub fn validate(&self, field: &str) -> Result<(), ConfigValidationError> {
        let invalid = |reason: &str| ConfigValidationError::InvalidDistribution {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        match *self {
            DistributionSpec::Exponential { rate } => {
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(invalid("exponential rate must be finite and greater than 0"));
                }
            }
            DistributionSpec::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(invalid("normal mean must be finite and std_dev finite and >= 0"));
                }
            }
            DistributionSpec::Gamma { shape, scale } => {
                if !shape.is_finite() || !scale.is_finite() || shape <= 0.0 || scale <= 0.0 {
                    return Err(invalid("gamma shape and scale must be finite and greater than 0"));
                }
            }
        }
        Ok(())
    }

    /// Whether the mean or spread of the distribution exceeds `max_hours`
    pub fn exceeds(&self, max_hours: f64) -> bool {
        match *self {
            DistributionSpec::Exponential { .. } => self.mean() > max_hours,
            DistributionSpec::Normal { mean, std_dev } => mean > max_hours || std_dev > max_hours,
            DistributionSpec::Gamma { scale, .. } => self.mean() > max_hours || scale > max_hours,
        }
    }

    /// Expected value of the unclipped distribution
    pub fn mean(&self) -> f64 {
        match *self {
            DistributionSpec::Exponential { rate } => 1.0 / rate,
            DistributionSpec::Normal { mean, .. } => mean,
            DistributionSpec::Gamma { shape, scale } => shape * scale,
        }
    }
}

/// Arrival and service parameters for one request class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassParameters {
    /// Mean number of calls per day (Poisson lambda)
    pub mean_daily_calls: f64,
    /// Gap between consecutive calls of the same day (hours)
    pub inter_arrival: DistributionSpec,
    /// Sampled service duration carried on each call (hours)
    pub service_duration: DistributionSpec,
    /// Fixed slot length booked on the machine for every request (hours)
    pub slot_duration_hours: f64,
}

impl ClassParameters {
    /// Default parameters for Class A requests
    pub fn class_a() -> Self {
        Self {
            mean_daily_calls: defaults::CLASS_A_MEAN_DAILY_CALLS,
            inter_arrival: DistributionSpec::Exponential { rate: defaults::CLASS_A_ARRIVAL_RATE },
            service_duration: DistributionSpec::Normal {
                mean: defaults::CLASS_A_DURATION_MEAN,
                std_dev: defaults::CLASS_A_DURATION_STD_DEV,
            },
            slot_duration_hours: defaults::CLASS_A_SLOT_HOURS,
        }
    }

    /// Default parameters for Class B requests
    pub fn class_b() -> Self {
        Self {
            mean_daily_calls: defaults::CLASS_B_MEAN_DAILY_CALLS,
            inter_arrival: DistributionSpec::Normal {
                mean: defaults::CLASS_B_GAP_MEAN,
                std_dev: defaults::CLASS_B_GAP_STD_DEV,
            },
            service_duration: DistributionSpec::Gamma {
                shape: defaults::CLASS_B_DURATION_SHAPE,
                scale: defaults::CLASS_B_DURATION_SCALE,
            },
            slot_duration_hours: defaults::CLASS_B_SLOT_HOURS,
        }
    }

    /// Validate the parameters of the given class
    pub fn validate(&self, class: RequestClass) -> Result<(), ConfigValidationError> {
        if !self.mean_daily_calls.is_finite() || self.mean_daily_calls < 0.0 {
            return Err(ConfigValidationError::InvalidArrivalRate {
                class,
                value: self.mean_daily_calls,
            });
        }

        if !self.slot_duration_hours.is_finite()
            || self.slot_duration_hours < 0.0
            || self.slot_duration_hours > defaults::MAX_SLOT_HOURS
        {
            return Err(ConfigValidationError::InvalidSlotDuration {
                class,
                value: self.slot_duration_hours,
            });
        }

        let gap_field = format!("{} inter_arrival", class);
        self.inter_arrival.validate(&gap_field)?;
        if self.inter_arrival.exceeds(defaults::MAX_GAP_HOURS) {
            return Err(ConfigValidationError::InvalidDistribution {
                field: gap_field,
                reason: format!("mean and spread must not exceed {} hours", defaults::MAX_GAP_HOURS),
            });
        }
        self.service_duration.validate(&format!("{} service_duration", class))?;
        Ok(())
    }
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scan-appointment-simulator",
    version = "0.1.0",
    about = "Scan Appointment Simulator - Books random calls onto two scan machines and reports waiting and idle time",
    long_about = "Generates random calls for two request classes over a multi-day horizon, books each call on the earliest 5-minute slot of its dedicated machine from the next business day onwards, and reports waiting time, machine idle time and appointment volumes.

EXAMPLES:
    # Run with default settings (30 days, 08:00-17:00)
    scan-appointment-simulator

    # Use a configuration file
    scan-appointment-simulator --config config.json

    # Reproducible run over a longer horizon
    scan-appointment-simulator --days 60 --seed 42

    # Generate configuration template
    scan-appointment-simulator --print-config > my-config.json

    # Validate configuration without running
    scan-appointment-simulator --config my-config.json --dry-run

    # Machine readable report
    scan-appointment-simulator --output-format json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of days to simulate
    #[arg(
        long,
        help = "Number of days to simulate",
        long_help = "Number of days of incoming calls to simulate. Must be greater than 0. Default: 30"
    )]
    pub days: Option<usize>,

    /// First calendar day of the simulation
    #[arg(long, help = "First simulated day (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Opening hour of the machines
    #[arg(long, help = "Opening hour of the working day (0-23)")]
    pub day_start: Option<u32>,

    /// Closing hour of the machines
    #[arg(long, help = "Closing hour of the working day (1-24)")]
    pub day_end: Option<u32>,

    /// Mean number of Class A calls per day
    #[arg(long, help = "Mean Class A calls per day")]
    pub class_a_daily_calls: Option<f64>,

    /// Mean number of Class B calls per day
    #[arg(long, help = "Mean Class B calls per day")]
    pub class_b_daily_calls: Option<f64>,

    /// Slot length booked for Class A requests
    #[arg(long, help = "Class A slot length in hours")]
    pub class_a_slot_hours: Option<f64>,

    /// Slot length booked for Class B requests
    #[arg(long, help = "Class B slot length in hours")]
    pub class_b_slot_hours: Option<f64>,

    /// Output format for the report
    #[arg(
        long,
        help = "Report format (text or json)",
        long_help = "Output format for the performance report. Supported formats: text, json. Default: text"
    )]
    pub output_format: Option<String>,

    /// Number of generated calls to print before the report
    #[arg(long, help = "Number of generated calls to preview (0 disables)")]
    pub preview_calls: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of days to simulate
    pub days: Option<usize>,

    /// First calendar day of the simulation
    pub start_date: Option<NaiveDate>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Opening hours of the machines
    pub business_hours: Option<BusinessHours>,

    /// Class A arrival and service parameters
    pub class_a: Option<ClassParameters>,

    /// Class B arrival and service parameters
    pub class_b: Option<ClassParameters>,

    /// Output format for the report
    pub output_format: Option<String>,

    /// Number of generated calls to print before the report
    pub preview_calls: Option<usize>,
}

/// Configuration for the appointment simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of days to simulate
    pub days: usize,

    /// First calendar day of the simulation
    pub start_date: NaiveDate,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Opening hours of the machines
    pub business_hours: BusinessHours,

    /// Class A arrival and service parameters
    pub class_a: ClassParameters,

    /// Class B arrival and service parameters
    pub class_b: ClassParameters,

    /// Output format for the report
    pub output_format: String,

    /// Number of generated calls to print before the report
    pub preview_calls: usize,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Days count is invalid
    #[error("Days count must be greater than 0, got {0}")]
    InvalidDaysCount(usize),

    /// Business hours do not describe a window inside one day
    #[error("Invalid business hours: start ({day_start}) must be < end ({day_end}) and end <= 24")]
    InvalidBusinessHours {
        /// Opening hour
        day_start: u32,
        /// Closing hour
        day_end: u32,
    },

    /// Mean daily call count is negative or not a number
    #[error("Invalid mean daily calls for {class}: {value} (must be finite and >= 0)")]
    InvalidArrivalRate {
        /// Class with the invalid rate
        class: RequestClass,
        /// The invalid value
        value: f64,
    },

    /// Slot length is negative or not a number
    #[error("Invalid slot duration for {class}: {value} hours (must be between 0 and 24)")]
    InvalidSlotDuration {
        /// Class with the invalid slot length
        class: RequestClass,
        /// The invalid value
        value: f64,
    },

    /// Distribution parameters rejected
    #[error("Invalid distribution for {field}: {reason}")]
    InvalidDistribution {
        /// Name of the distribution field
        field: String,
        /// Why the parameters were rejected
        reason: String,
    },

    /// Output format not recognised
    #[error("Unknown output format: {0} (supported: text, json)")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: defaults::HORIZON_DAYS,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            seed: None,
            business_hours: BusinessHours::default(),
            class_a: ClassParameters::class_a(),
            class_b: ClassParameters::class_b(),
            output_format: "text".to_string(),
            preview_calls: defaults::PREVIEW_CALLS,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            days: config_file.days.unwrap_or(defaults.days),
            start_date: config_file.start_date.unwrap_or(defaults.start_date),
            seed: config_file.seed.or(defaults.seed),
            business_hours: config_file.business_hours.unwrap_or(defaults.business_hours),
            class_a: config_file.class_a.unwrap_or(defaults.class_a),
            class_b: config_file.class_b.unwrap_or(defaults.class_b),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            preview_calls: config_file.preview_calls.unwrap_or(defaults.preview_calls),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.days {
            config.days = value;
        }
        if let Some(value) = args.start_date {
            config.start_date = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.day_start {
            config.business_hours.day_start = value;
        }
        if let Some(value) = args.day_end {
            config.business_hours.day_end = value;
        }
        if let Some(value) = args.class_a_daily_calls {
            config.class_a.mean_daily_calls = value;
        }
        if let Some(value) = args.class_b_daily_calls {
            config.class_b.mean_daily_calls = value;
        }
        if let Some(value) = args.class_a_slot_hours {
            config.class_a.slot_duration_hours = value;
        }
        if let Some(value) = args.class_b_slot_hours {
            config.class_b.slot_duration_hours = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.preview_calls {
            config.preview_calls = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.days == 0 {
            return Err(ConfigValidationError::InvalidDaysCount(self.days));
        }

        self.business_hours.validate()?;

        for class in RequestClass::ALL {
            self.parameters_for(class).validate(class)?;
        }

        self.get_output_format()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))?;

        Ok(())
    }

    /// Parameters of the given request class
    pub fn parameters_for(&self, class: RequestClass) -> &ClassParameters {
        match class {
            RequestClass::ClassA => &self.class_a,
            RequestClass::ClassB => &self.class_b,
        }
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Last calendar day on which calls are generated
    pub fn end_date(&self) -> NaiveDate {
        let span = self.days.saturating_sub(1) as i64;
        self.start_date + chrono::Duration::days(span)
    }

    /// Expected total number of calls over the horizon
    pub fn expected_total_calls(&self) -> f64 {
        (self.class_a.mean_daily_calls + self.class_b.mean_daily_calls) * self.days as f64
    }
}
