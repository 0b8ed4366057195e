//! End-to-end scenarios for the simulation run
//!
//! These tests drive whole runs through the public API with scripted and
//! seeded durations and check the headline results.

use clinic_flow_sim::facility::BoundaryPoint;
use clinic_flow_sim::simulation::{ClinicSimulation, ScriptedDurations, SimulationError};
use clinic_flow_sim::types::{LocationId, SimulationConfig};
use std::collections::BTreeMap;

fn single_doctor_config(num_patients: usize) -> SimulationConfig {
    SimulationConfig {
        num_patients,
        num_doctors: 1,
        department_assignment: BTreeMap::from([
            ("reception".to_string(), LocationId(9)),
            ("doctor-1".to_string(), LocationId(1)),
            ("pharmacy".to_string(), LocationId(7)),
        ]),
        ..Default::default()
    }
}

/// Reference clinic, one patient arriving at opening
#[test]
fn test_reference_clinic_single_patient() {
    let config = SimulationConfig { num_patients: 1, ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(0.0, 0.3)).unwrap();
    let outcome = snapshot.outcome();

    assert_eq!(outcome.patients_seen, 1);
    assert_eq!(outcome.patients_left, 0);
    assert_eq!(outcome.total_distance, 12.0);

    // Both doctors idle, tie goes to the first
    assert_eq!(snapshot.patients_per_doctor, vec![1, 0]);
    assert_eq!(snapshot.max_wait, 0.0);
    assert!((snapshot.last_completion.unwrap() - (0.15 + 0.3 + 0.08)).abs() < 1e-9);
}

/// A gap past closing turns the only patient away before it walks anywhere
#[test]
fn test_arrival_after_closing_walks_nowhere() {
    let config = SimulationConfig { num_patients: 1, ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let outcome = simulation
        .run_with(&mut ScriptedDurations::constant(13.0, 0.3))
        .unwrap()
        .outcome();

    assert_eq!(outcome.patients_seen, 0);
    assert_eq!(outcome.patients_left, 1);
    assert_eq!(outcome.total_distance, 0.0);
}

/// Arriving exactly at closing is still allowed in
#[test]
fn test_arrival_at_closing_is_not_after_closing() {
    let config = SimulationConfig {
        num_patients: 1,
        reception_duration: 0.0,
        pharmacy_duration: 0.0,
        ..Default::default()
    };
    let simulation = ClinicSimulation::new(config).unwrap();

    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(12.0, 0.0)).unwrap();
    assert_eq!(snapshot.patients_seen, 1);
    assert_eq!(snapshot.total_distance, 12.0);
}

/// With one doctor the second patient waits for the rest of the first consultation
#[test]
fn test_serial_queueing_with_one_doctor() {
    let simulation = ClinicSimulation::new(single_doctor_config(2)).unwrap();

    // First arrives at 0.0 and consults for 0.4; second arrives 0.1 later
    let mut durations = ScriptedDurations::sequence(vec![0.0, 0.1], vec![0.4, 0.3]);
    let snapshot = simulation.run_with(&mut durations).unwrap();

    assert_eq!(snapshot.patients_seen, 2);
    assert!((snapshot.total_wait - 0.3).abs() < 1e-9);
    assert!((snapshot.max_wait - 0.3).abs() < 1e-9);
    assert_eq!(snapshot.patients_per_doctor, vec![2]);

    // Second patient: 0.1 + 0.15 + 0.3 wait + 0.3 consult + 0.08
    assert!((snapshot.last_completion.unwrap() - 0.93).abs() < 1e-9);
}

/// A second doctor absorbs the overlap and nobody waits
#[test]
fn test_two_doctors_share_the_load() {
    let config = SimulationConfig { num_patients: 2, ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let mut durations = ScriptedDurations::sequence(vec![0.0, 0.1], vec![0.4, 0.3]);
    let snapshot = simulation.run_with(&mut durations).unwrap();

    assert_eq!(snapshot.total_wait, 0.0);
    assert_eq!(snapshot.patients_per_doctor, vec![1, 1]);
    // 4+4+2+2 via Doctor 1, then 4+4+4+2 with the pharmacy leg leaving Doctor 2
    assert_eq!(snapshot.total_distance, 26.0);
}

/// The walk from reception is charged to Doctor 1's room whoever is free
#[test]
fn test_reception_leg_is_charged_to_first_doctor() {
    let config = SimulationConfig {
        num_patients: 2,
        department_assignment: BTreeMap::from([
            ("reception".to_string(), LocationId(9)),
            ("doctor-1".to_string(), LocationId(1)),
            ("doctor-2".to_string(), LocationId(6)),
            ("pharmacy".to_string(), LocationId(7)),
        ]),
        ..Default::default()
    };
    let simulation = ClinicSimulation::new(config).unwrap();

    let mut durations = ScriptedDurations::sequence(vec![0.0, 0.1], vec![0.4, 0.3]);
    let snapshot = simulation.run_with(&mut durations).unwrap();

    assert_eq!(snapshot.patients_per_doctor, vec![1, 1]);
    // Second patient: entry 4, reception to Doctor 1 4, Doctor 2 (1,2) to pharmacy 3, exit 2
    assert_eq!(snapshot.total_distance, 12.0 + 13.0);
}

/// Once the clock passes closing every later patient is turned away
#[test]
fn test_late_patients_are_all_turned_away() {
    let config = SimulationConfig { num_patients: 5, ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(5.0, 0.3)).unwrap();

    // Arrivals at 5 and 10 are served; 15, 20 and 25 are after closing
    assert_eq!(snapshot.patients_seen, 2);
    assert_eq!(snapshot.patients_left, 3);
    assert_eq!(snapshot.left_at_door, 3);
    assert_eq!(snapshot.total_distance, 24.0);
}

/// Overrunning patients are turned away but their walk is counted
#[test]
fn test_overrun_counts_distance() {
    let config = SimulationConfig { num_patients: 1, ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(11.8, 0.3)).unwrap();

    assert_eq!(snapshot.patients_seen, 0);
    assert_eq!(snapshot.left_after_overrun, 1);
    assert_eq!(snapshot.total_distance, 12.0);
}

#[test]
fn test_zero_patients() {
    let config = SimulationConfig { num_patients: 0, seed: Some(1), ..Default::default() };
    let outcome = ClinicSimulation::new(config).unwrap().run().unwrap().outcome();

    assert_eq!(outcome.patients_seen, 0);
    assert_eq!(outcome.patients_left, 0);
    assert_eq!(outcome.total_distance, 0.0);
}

/// Every patient ends up either seen or left
#[test]
fn test_every_patient_is_accounted_for() {
    for seed in 0..20u64 {
        let config = SimulationConfig {
            num_patients: 60,
            seed: Some(seed),
            ..Default::default()
        };
        let snapshot = ClinicSimulation::new(config).unwrap().run().unwrap();

        assert_eq!(snapshot.patients_seen + snapshot.patients_left, 60);
        assert_eq!(
            snapshot.left_at_door + snapshot.left_after_overrun,
            snapshot.patients_left
        );
        assert!(snapshot.total_distance >= 0.0);
    }
}

/// Adding patients under the same seed never reduces the distance walked
#[test]
fn test_distance_grows_with_patients() {
    let mut previous = 0.0;
    for num_patients in 0..30 {
        let config = SimulationConfig { num_patients, seed: Some(99), ..Default::default() };
        let distance = ClinicSimulation::new(config).unwrap().run().unwrap().total_distance;
        assert!(distance >= previous, "{} < {} at {} patients", distance, previous, num_patients);
        previous = distance;
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = SimulationConfig { seed: Some(2024), ..Default::default() };
    let simulation = ClinicSimulation::new(config).unwrap();

    let first = simulation.run().unwrap();
    let second = simulation.run().unwrap();
    assert_eq!(first, second);

    let other = simulation.run_with_seed(Some(2025)).unwrap();
    assert_eq!(other.total_patients(), first.total_patients());
}

/// Departments in a straight line between entry and exit
#[test]
fn test_straight_line_layout() {
    let config = SimulationConfig {
        grid_size: 5,
        num_patients: 1,
        num_doctors: 1,
        entry_point: Some((0, 0)),
        exit_point: Some((0, 4)),
        department_assignment: BTreeMap::from([
            ("reception".to_string(), LocationId(2)),
            ("doctor-1".to_string(), LocationId(3)),
            ("pharmacy".to_string(), LocationId(4)),
        ]),
        ..Default::default()
    };
    let simulation = ClinicSimulation::new(config).unwrap();
    let layout = simulation.layout();

    let segments: u32 = [
        layout.grid().distance(BoundaryPoint::Entry, LocationId(2)),
        layout.grid().distance(LocationId(2), LocationId(3)),
        layout.grid().distance(LocationId(3), LocationId(4)),
        layout.grid().distance(LocationId(4), BoundaryPoint::Exit),
    ]
    .into_iter()
    .map(|d| d.unwrap())
    .sum();

    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(0.0, 0.3)).unwrap();
    assert_eq!(snapshot.total_distance, segments as f64);
    assert_eq!(segments, 4);
}

#[test]
fn test_travel_time_can_push_past_closing() {
    let config = SimulationConfig {
        num_patients: 1,
        travel_hours_per_cell: 0.5,
        ..Default::default()
    };
    let simulation = ClinicSimulation::new(config).unwrap();

    // 12 cells at 0.5h each adds 6h to a journey starting at 6h
    let snapshot = simulation.run_with(&mut ScriptedDurations::constant(6.0, 0.3)).unwrap();
    assert_eq!(snapshot.left_after_overrun, 1);
}

#[test]
fn test_location_outside_grid_is_invalid_reference() {
    let mut config = SimulationConfig::default();
    config.department_assignment.insert("pharmacy".to_string(), LocationId(10));

    match ClinicSimulation::new(config) {
        Err(SimulationError::InvalidReference { grid_size, .. }) => assert_eq!(grid_size, 3),
        other => panic!("Expected InvalidReference, got {:?}", other),
    }
}

#[test]
fn test_shared_location_is_configuration_error() {
    let mut config = SimulationConfig::default();
    config.department_assignment.insert("doctor-2".to_string(), LocationId(1));

    assert!(matches!(
        ClinicSimulation::new(config),
        Err(SimulationError::ConfigurationError(_))
    ));
}

#[test]
fn test_unknown_role_is_configuration_error() {
    let mut config = SimulationConfig::default();
    config.department_assignment.insert("radiology".to_string(), LocationId(5));

    let err = ClinicSimulation::new(config).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigurationError(_)));
    assert!(err.to_string().contains("radiology"));
}

#[test]
fn test_missing_doctor_is_configuration_error() {
    let config = SimulationConfig { num_doctors: 3, ..Default::default() };
    assert!(matches!(
        ClinicSimulation::new(config),
        Err(SimulationError::ConfigurationError(_))
    ));
}
