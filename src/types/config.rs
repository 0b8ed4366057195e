//! Configuration structures for the clinic simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the parameters of a simulation run.

use super::{Department, LocationId, OutputFormat};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parameters of the reference clinic
pub mod defaults {
    /// Side length of the square grid
    pub const GRID_SIZE: usize = 3;

    /// Largest side length whose location numbers all fit in a `u32`
    pub const MAX_GRID_SIZE: usize = 65_535;

    /// Patients generated per run
    pub const NUM_PATIENTS: usize = 20;

    /// Closing time in hours after opening
    pub const CLINIC_CLOSE_TIME: f64 = 12.0;

    /// Inter-arrival gap bounds in hours (12 to 36 minutes)
    pub const ARRIVAL_GAP_RANGE: (f64, f64) = (0.2, 0.6);

    /// Reception service time in hours (9 minutes)
    pub const RECEPTION_DURATION: f64 = 0.15;

    /// Consultation time bounds in hours (15 to 30 minutes)
    pub const CONSULT_DURATION_RANGE: (f64, f64) = (0.25, 0.5);

    /// Pharmacy service time in hours (5 minutes)
    pub const PHARMACY_DURATION: f64 = 0.08;

    /// Size of the doctor pool
    pub const NUM_DOCTORS: usize = 2;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clinic-flow-sim",
    version = "0.1.0",
    about = "Clinic Flow Simulator - Scores a clinic layout by patient throughput and walking distance",
    long_about = "Simulates patients arriving at a small clinic laid out on a square grid. Each patient walks from the entry through reception, a doctor and the pharmacy to the exit. The run reports how many patients were seen before closing, how many left, and the total distance walked.

EXAMPLES:
    # Run the reference clinic
    clinic-flow-sim

    # Use a configuration file
    clinic-flow-sim --config clinic.json

    # Move departments around
    clinic-flow-sim --assign reception=2 --assign doctor-1=5 --assign doctor-2=6 --assign pharmacy=8

    # Reproducible run averaged over 50 replications
    clinic-flow-sim --seed 42 --replications 50

    # Generate configuration template
    clinic-flow-sim --print-config > clinic.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
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

    /// Side length of the square grid
    #[arg(long, help = "Side length of the square grid")]
    pub grid_size: Option<usize>,

    /// Department placement as ROLE=LOCATION, repeatable
    #[arg(
        long = "assign",
        value_name = "ROLE=LOCATION",
        help = "Place a department on a grid location (e.g. reception=9)",
        long_help = "Place a department on a grid location. Roles: reception, doctor-N, pharmacy. Locations are numbered row-major from 1 (L_1 is the top-left cell). Repeat the flag for each department."
    )]
    pub assign: Vec<String>,

    /// Number of patients to generate
    #[arg(long, help = "Number of patients to generate")]
    pub num_patients: Option<usize>,

    /// Closing time in hours after opening
    #[arg(long, help = "Closing time in hours after opening")]
    pub clinic_close_time: Option<f64>,

    /// Lower bound of the inter-arrival gap (hours)
    #[arg(long, help = "Minimum gap between arrivals in hours")]
    pub arrival_gap_min: Option<f64>,

    /// Upper bound of the inter-arrival gap (hours)
    #[arg(long, help = "Maximum gap between arrivals in hours")]
    pub arrival_gap_max: Option<f64>,

    /// Reception service time (hours)
    #[arg(long, help = "Reception service time in hours")]
    pub reception_duration: Option<f64>,

    /// Lower bound of the consultation time (hours)
    #[arg(long, help = "Minimum consultation time in hours")]
    pub consult_min: Option<f64>,

    /// Upper bound of the consultation time (hours)
    #[arg(long, help = "Maximum consultation time in hours")]
    pub consult_max: Option<f64>,

    /// Pharmacy service time (hours)
    #[arg(long, help = "Pharmacy service time in hours")]
    pub pharmacy_duration: Option<f64>,

    /// Number of interchangeable doctors
    #[arg(long, help = "Number of doctors")]
    pub num_doctors: Option<usize>,

    /// Walking time per grid cell (hours)
    #[arg(
        long,
        help = "Walking time per grid cell in hours",
        long_help = "Simulated time spent walking one grid cell. Default: 0.0 (walking is instantaneous and only counts towards distance)"
    )]
    pub travel_hours_per_cell: Option<f64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Number of independent runs of the same layout
    #[arg(long, help = "Number of replications of the same layout")]
    pub replications: Option<usize>,

    /// Report format
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<String>,

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

    /// Draw the layout before running
    #[arg(long, help = "Print the clinic layout grid")]
    pub show_layout: bool,

    /// Emit log lines as JSON
    #[arg(long, help = "Format log output as JSON")]
    pub log_json: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, value_name = "DIR", help = "Write logs to daily rolling files in DIR")]
    pub log_dir: Option<String>,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Side length of the square grid
    pub grid_size: Option<usize>,

    /// Department role to location mapping
    pub department_assignment: Option<BTreeMap<String, LocationId>>,

    /// Number of patients to generate
    pub num_patients: Option<usize>,

    /// Closing time in hours
    pub clinic_close_time: Option<f64>,

    /// Inter-arrival gap bounds in hours
    pub arrival_gap_range: Option<(f64, f64)>,

    /// Reception service time in hours
    pub reception_duration: Option<f64>,

    /// Consultation time bounds in hours
    pub consult_duration_range: Option<(f64, f64)>,

    /// Pharmacy service time in hours
    pub pharmacy_duration: Option<f64>,

    /// Number of doctors
    pub num_doctors: Option<usize>,

    /// Entry coordinate `(row, col)`
    pub entry_point: Option<(usize, usize)>,

    /// Exit coordinate `(row, col)`
    pub exit_point: Option<(usize, usize)>,

    /// Walking time per grid cell in hours
    pub travel_hours_per_cell: Option<f64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of replications
    pub replications: Option<usize>,

    /// Report format
    pub output_format: Option<String>,
}

/// Configuration for a clinic simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Side length of the square grid
    pub grid_size: usize,

    /// Department role (`reception`, `doctor-N`, `pharmacy`) to location mapping
    pub department_assignment: BTreeMap<String, LocationId>,

    /// Number of patients to generate
    pub num_patients: usize,

    /// Closing time in hours after opening
    pub clinic_close_time: f64,

    /// Inter-arrival gap bounds in hours (inclusive)
    pub arrival_gap_range: (f64, f64),

    /// Reception service time in hours
    pub reception_duration: f64,

    /// Consultation time bounds in hours (inclusive)
    pub consult_duration_range: (f64, f64),

    /// Pharmacy service time in hours
    pub pharmacy_duration: f64,

    /// Number of interchangeable doctors
    pub num_doctors: usize,

    /// Entry coordinate `(row, col)`, top-left corner when unset
    pub entry_point: Option<(usize, usize)>,

    /// Exit coordinate `(row, col)`, bottom-right corner when unset
    pub exit_point: Option<(usize, usize)>,

    /// Walking time per grid cell in hours
    pub travel_hours_per_cell: f64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of independent runs of the same layout
    pub replications: usize,

    /// Report format
    pub output_format: String,
}

/// Configuration loading errors
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

    /// Malformed `--assign` argument
    #[error("Invalid department assignment '{0}' (expected ROLE=LOCATION)")]
    InvalidAssignment(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Grid size is invalid
    #[error("Grid size must be between 1 and 65535, got {0}")]
    InvalidGridSize(usize),

    /// Doctor count is invalid
    #[error("Doctor count must be between 1 and 255, got {0}")]
    InvalidDoctorCount(usize),

    /// Replication count is invalid
    #[error("Replication count must be greater than 0, got {0}")]
    InvalidReplicationCount(usize),

    /// Closing time is invalid
    #[error("Clinic close time must be a positive number of hours, got {0}")]
    InvalidCloseTime(f64),

    /// A duration is negative or not finite
    #[error("Invalid duration for {field}: {value} (must be a finite, non-negative number of hours)")]
    InvalidDuration {
        /// Name of the field with the invalid duration
        field: String,
        /// The invalid value
        value: f64,
    },

    /// A range is inverted or has invalid bounds
    #[error("Invalid range for {field}: ({min}, {max}) (bounds must be finite, non-negative and min <= max)")]
    InvalidRange {
        /// Name of the field with the invalid range
        field: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Entry or exit lies outside the grid
    #[error("{point} point ({row}, {col}) lies outside the {grid_size}x{grid_size} grid")]
    BoundaryOutsideGrid {
        /// Which boundary point
        point: String,
        /// Row of the point
        row: usize,
        /// Column of the point
        col: usize,
        /// Side length of the grid
        grid_size: usize,
    },

    /// Output format is not recognised
    #[error("Unknown output format: {0}")]
    InvalidOutputFormat(String),
}

fn reference_assignment() -> BTreeMap<String, LocationId> {
    [
        (Department::Reception, 9),
        (Department::Doctor(1), 1),
        (Department::Doctor(2), 3),
        (Department::Pharmacy, 7),
    ]
    .into_iter()
    .map(|(role, number)| (role.config_key(), LocationId(number)))
    .collect()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: defaults::GRID_SIZE,
            department_assignment: reference_assignment(),
            num_patients: defaults::NUM_PATIENTS,
            clinic_close_time: defaults::CLINIC_CLOSE_TIME,
            arrival_gap_range: defaults::ARRIVAL_GAP_RANGE,
            reception_duration: defaults::RECEPTION_DURATION,
            consult_duration_range: defaults::CONSULT_DURATION_RANGE,
            pharmacy_duration: defaults::PHARMACY_DURATION,
            num_doctors: defaults::NUM_DOCTORS,
            entry_point: None,
            exit_point: None,
            travel_hours_per_cell: 0.0,
            seed: None,
            replications: 1,
            output_format: "text".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args)?;

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
            grid_size: config_file.grid_size.unwrap_or(defaults.grid_size),
            department_assignment: config_file
                .department_assignment
                .unwrap_or(defaults.department_assignment),
            num_patients: config_file.num_patients.unwrap_or(defaults.num_patients),
            clinic_close_time: config_file
                .clinic_close_time
                .unwrap_or(defaults.clinic_close_time),
            arrival_gap_range: config_file
                .arrival_gap_range
                .unwrap_or(defaults.arrival_gap_range),
            reception_duration: config_file
                .reception_duration
                .unwrap_or(defaults.reception_duration),
            consult_duration_range: config_file
                .consult_duration_range
                .unwrap_or(defaults.consult_duration_range),
            pharmacy_duration: config_file
                .pharmacy_duration
                .unwrap_or(defaults.pharmacy_duration),
            num_doctors: config_file.num_doctors.unwrap_or(defaults.num_doctors),
            entry_point: config_file.entry_point.or(defaults.entry_point),
            exit_point: config_file.exit_point.or(defaults.exit_point),
            travel_hours_per_cell: config_file
                .travel_hours_per_cell
                .unwrap_or(defaults.travel_hours_per_cell),
            seed: config_file.seed.or(defaults.seed),
            replications: config_file.replications.unwrap_or(defaults.replications),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.grid_size {
            config.grid_size = value;
        }
        if let Some(value) = args.num_patients {
            config.num_patients = value;
        }
        if let Some(value) = args.clinic_close_time {
            config.clinic_close_time = value;
        }
        if let Some(value) = args.arrival_gap_min {
            config.arrival_gap_range.0 = value;
        }
        if let Some(value) = args.arrival_gap_max {
            config.arrival_gap_range.1 = value;
        }
        if let Some(value) = args.reception_duration {
            config.reception_duration = value;
        }
        if let Some(value) = args.consult_min {
            config.consult_duration_range.0 = value;
        }
        if let Some(value) = args.consult_max {
            config.consult_duration_range.1 = value;
        }
        if let Some(value) = args.pharmacy_duration {
            config.pharmacy_duration = value;
        }
        if let Some(value) = args.num_doctors {
            config.num_doctors = value;
        }
        if let Some(value) = args.travel_hours_per_cell {
            config.travel_hours_per_cell = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.replications {
            config.replications = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }

        // Individual placements replace the matching role only
        for entry in &args.assign {
            let (role, location) = parse_assignment(entry)?;
            if let Ok(department) = role.parse::<Department>() {
                config
                    .department_assignment
                    .retain(|key, _| key.parse::<Department>().ok() != Some(department));
            }
            config.department_assignment.insert(role, location);
        }

        Ok(())
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

    /// Validate the scalar configuration parameters
    ///
    /// The department mapping is checked against the grid when the
    /// [`FacilityLayout`](crate::facility::FacilityLayout) is built.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.grid_size == 0 || self.grid_size > defaults::MAX_GRID_SIZE {
            return Err(ConfigValidationError::InvalidGridSize(self.grid_size));
        }

        if self.num_doctors == 0 || self.num_doctors > u8::MAX as usize {
            return Err(ConfigValidationError::InvalidDoctorCount(self.num_doctors));
        }

        if self.replications == 0 {
            return Err(ConfigValidationError::InvalidReplicationCount(self.replications));
        }

        if !self.clinic_close_time.is_finite() || self.clinic_close_time <= 0.0 {
            return Err(ConfigValidationError::InvalidCloseTime(self.clinic_close_time));
        }

        self.validate_range("arrival_gap_range", self.arrival_gap_range)?;
        self.validate_range("consult_duration_range", self.consult_duration_range)?;
        self.validate_duration("reception_duration", self.reception_duration)?;
        self.validate_duration("pharmacy_duration", self.pharmacy_duration)?;
        self.validate_duration("travel_hours_per_cell", self.travel_hours_per_cell)?;

        let (entry, exit) = self.boundary_points();
        self.validate_boundary("Entry", entry)?;
        self.validate_boundary("Exit", exit)?;

        self.get_output_format()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))?;

        Ok(())
    }

    fn validate_duration(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigValidationError::InvalidDuration { field: field.to_string(), value });
        }
        Ok(())
    }

    fn validate_range(&self, field: &str, range: (f64, f64)) -> Result<(), ConfigValidationError> {
        let (min, max) = range;
        let bounds_ok = min.is_finite() && max.is_finite() && min >= 0.0 && min <= max;
        if !bounds_ok {
            return Err(ConfigValidationError::InvalidRange { field: field.to_string(), min, max });
        }
        Ok(())
    }

    fn validate_boundary(
        &self,
        point: &str,
        (row, col): (usize, usize),
    ) -> Result<(), ConfigValidationError> {
        if row >= self.grid_size || col >= self.grid_size {
            return Err(ConfigValidationError::BoundaryOutsideGrid {
                point: point.to_string(),
                row,
                col,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }

    /// Entry and exit coordinates, falling back to opposite grid corners
    pub fn boundary_points(&self) -> ((usize, usize), (usize, usize)) {
        let far = self.grid_size.saturating_sub(1);
        (self.entry_point.unwrap_or((0, 0)), self.exit_point.unwrap_or((far, far)))
    }

    /// Location assigned to a department, if any
    ///
    /// Keys are matched by role, so `"Doctor 1"` and `"doctor-1"` are equivalent.
    pub fn location_of(&self, department: Department) -> Option<LocationId> {
        self.department_assignment
            .iter()
            .find(|(key, _)| key.parse::<Department>().ok() == Some(department))
            .map(|(_, location)| *location)
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}

/// Split a `ROLE=LOCATION` argument
///
/// Recognised roles are stored under their canonical key; anything else is kept
/// verbatim so that layout validation can report it as an unknown role.
fn parse_assignment(entry: &str) -> Result<(String, LocationId), ConfigError> {
    let (role, location) = entry
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAssignment(entry.to_string()))?;

    let location: LocationId = location
        .parse()
        .map_err(|_| ConfigError::InvalidAssignment(entry.to_string()))?;

    let key = match role.parse::<Department>() {
        Ok(department) => department.config_key(),
        Err(_) => role.trim().to_string(),
    };

    Ok((key, location))
}
