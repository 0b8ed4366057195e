//! Tests for configuration loading and CLI argument parsing
//!
//! These tests verify the layering of CLI flags over a JSON configuration file
//! over defaults, and that bad input is rejected before a run starts.

use clap::Parser;
use clinic_flow_sim::simulation::{ClinicSimulation, SimulationError};
use clinic_flow_sim::types::config::{CliArgs, ConfigError, SimulationConfig};
use clinic_flow_sim::types::{Department, LocationId, OutputFormat};
use std::io::Write;
use tempfile::NamedTempFile;

fn json_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn parse(args: &[&str]) -> SimulationConfig {
    let mut argv = vec!["clinic-flow-sim"];
    argv.extend_from_slice(args);
    SimulationConfig::from_cli_args(CliArgs::try_parse_from(argv).unwrap()).unwrap()
}

#[test]
fn test_partial_file_merges_with_defaults() {
    let file = json_file(
        r#"{
            "num_patients": 35,
            "clinic_close_time": 8.0,
            "consult_duration_range": [0.3, 0.6]
        }"#,
    );

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.num_patients, 35);
    assert_eq!(config.clinic_close_time, 8.0);
    assert_eq!(config.consult_duration_range, (0.3, 0.6));

    // Untouched fields keep their defaults
    assert_eq!(config.grid_size, 3);
    assert_eq!(config.num_doctors, 2);
    assert_eq!(config.location_of(Department::Reception), Some(LocationId(9)));
}

#[test]
fn test_file_with_full_layout() {
    let file = json_file(
        r#"{
            "grid_size": 4,
            "num_doctors": 3,
            "department_assignment": {
                "reception": 6,
                "doctor-1": 2,
                "doctor-2": 3,
                "doctor-3": 4,
                "pharmacy": 11
            },
            "entry_point": [3, 0],
            "exit_point": [3, 3],
            "seed": 17
        }"#,
    );

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.boundary_points(), ((3, 0), (3, 3)));
    assert_eq!(config.location_of(Department::Doctor(3)), Some(LocationId(4)));

    let simulation = ClinicSimulation::new(config).unwrap();
    assert_eq!(simulation.layout().num_doctors(), 3);
    let snapshot = simulation.run().unwrap();
    assert_eq!(snapshot.patients_per_doctor.len(), 3);
}

#[test]
fn test_cli_overrides_file() {
    let file = json_file(r#"{ "num_patients": 35, "num_doctors": 1 }"#);
    let path = file.path().to_str().unwrap();

    let config = parse(&["--config", path, "--num-patients", "5", "--seed", "3"]);
    assert_eq!(config.num_patients, 5);
    assert_eq!(config.num_doctors, 1);
    assert_eq!(config.seed, Some(3));
}

#[test]
fn test_assign_replaces_matching_role() {
    let file = json_file(
        r#"{
            "department_assignment": {
                "Reception": 9,
                "Doctor 1": 1,
                "Doctor 2": 3,
                "Pharmacy": 7
            }
        }"#,
    );
    let path = file.path().to_str().unwrap();

    let config = parse(&["--config", path, "--assign", "doctor-1=5"]);
    assert_eq!(config.department_assignment.len(), 4);
    assert_eq!(config.location_of(Department::Doctor(1)), Some(LocationId(5)));

    ClinicSimulation::new(config).unwrap();
}

#[test]
fn test_assign_flags_build_a_new_layout() {
    let config = parse(&[
        "--assign",
        "reception=L_2",
        "--assign",
        "doctor-1=5",
        "--assign",
        "doctor-2=6",
        "--assign",
        "pharmacy=8",
        "--num-patients",
        "1",
    ]);

    let layout = ClinicSimulation::new(config).unwrap().layout().clone();
    assert_eq!(layout.location(Department::Reception).unwrap(), LocationId(2));
    assert_eq!(layout.department_at(LocationId(8)), Some(Department::Pharmacy));
    assert_eq!(layout.department_at(LocationId(9)), None);
}

#[test]
fn test_malformed_assign_flag() {
    let args = CliArgs::try_parse_from(["clinic-flow-sim", "--assign", "pharmacy"]).unwrap();
    assert!(matches!(
        SimulationConfig::from_cli_args(args),
        Err(ConfigError::InvalidAssignment(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SimulationConfig::from_file("/definitely/not/here.json"),
        Err(ConfigError::FileNotFound(_))
    ));
}

#[test]
fn test_unsupported_extension() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "num_patients: 3").unwrap();

    assert!(matches!(
        SimulationConfig::from_file(file.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_invalid_json() {
    let file = json_file("{ not json");
    assert!(matches!(
        SimulationConfig::from_file(file.path()),
        Err(ConfigError::JsonError(_))
    ));
}

#[test]
fn test_save_and_reload() {
    let config = SimulationConfig {
        num_patients: 12,
        seed: Some(8),
        output_format: "json".to_string(),
        ..Default::default()
    };
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();

    config.save_to_file(file.path()).unwrap();
    let reloaded = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.get_output_format().unwrap(), OutputFormat::Json);
}

#[test]
fn test_invalid_values_fail_before_running() {
    let cases = [
        SimulationConfig { grid_size: 0, ..Default::default() },
        SimulationConfig { grid_size: 70_000, ..Default::default() },
        SimulationConfig { num_doctors: 0, ..Default::default() },
        SimulationConfig { clinic_close_time: -1.0, ..Default::default() },
        SimulationConfig { arrival_gap_range: (0.6, 0.2), ..Default::default() },
        SimulationConfig { reception_duration: f64::NAN, ..Default::default() },
        SimulationConfig { exit_point: Some((3, 3)), ..Default::default() },
        SimulationConfig { output_format: "xml".to_string(), ..Default::default() },
    ];

    for config in cases {
        assert!(config.validate().is_err(), "{:?} should not validate", config);
        assert!(matches!(
            ClinicSimulation::new(config),
            Err(SimulationError::ConfigurationError(_))
        ));
    }
}

#[test]
fn test_flag_parsing() {
    let args = CliArgs::try_parse_from([
        "clinic-flow-sim",
        "--grid-size",
        "4",
        "--arrival-gap-min",
        "0.1",
        "--arrival-gap-max",
        "0.3",
        "--replications",
        "10",
        "--output-format",
        "json",
        "--show-layout",
        "--log-json",
        "-v",
    ])
    .unwrap();

    assert_eq!(args.grid_size, Some(4));
    assert_eq!(args.replications, Some(10));
    assert!(args.show_layout);
    assert!(args.log_json);
    assert!(args.verbose);
    assert!(!args.debug);
    assert!(args.log_dir.is_none());

    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert_eq!(config.arrival_gap_range, (0.1, 0.3));
    assert_eq!(config.get_output_format().unwrap(), OutputFormat::Json);
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(CliArgs::try_parse_from(["clinic-flow-sim", "--user-count", "5"]).is_err());
}
