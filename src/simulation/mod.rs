//! Simulation orchestration and control
//!
//! This module contains the run loop, the doctor pool, the arrival clock,
//! random duration sources, metrics collection and error handling.
//!
//! # Overview
//!
//! - **ClinicSimulation**: validates a layout and runs patients through it
//! - **ReplicationRunner**: repeats a run over consecutive seeds
//! - **DoctorPool**: busy-until bookkeeping for interchangeable doctors
//! - **ArrivalProcess**: generates arrivals and advances the clock
//! - **DurationSource**: seam for random or scripted durations
//! - **ClinicMetrics**: accumulates patients seen, patients left and distance
//! - **SimulationError**: error type for every fallible operation
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_flow_sim::simulation::*;
//! use clinic_flow_sim::types::*;
//!
//! let config = SimulationConfig { num_patients: 1, ..Default::default() };
//! let simulation = ClinicSimulation::new(config).unwrap();
//!
//! // First patient arrives at opening and sees doctor 1 straight away
//! let mut durations = ScriptedDurations::constant(0.0, 0.3);
//! let snapshot = simulation.run_with(&mut durations).unwrap();
//!
//! assert_eq!(snapshot.patients_seen, 1);
//! assert_eq!(snapshot.total_distance, 12.0);
//! ```

pub mod clock;
pub mod doctor_pool;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod replication;
pub mod sampling;
pub mod statistics;

// Re-export all public types for convenience
pub use clock::*;
pub use doctor_pool::*;
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use replication::*;
pub use sampling::*;
pub use statistics::*;
