//! Patients and their journey through the clinic
//!
//! # Overview
//!
//! - **Patient**: arrival time, time cursor and terminal outcome of one patient
//! - **JourneyPipeline**: the fixed Entry -> Reception -> Doctor -> Pharmacy -> Exit sequence
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_flow_sim::facility::FacilityLayout;
//! use clinic_flow_sim::patient::*;
//! use clinic_flow_sim::simulation::DoctorPool;
//! use clinic_flow_sim::types::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! let layout = FacilityLayout::from_config(&config).unwrap();
//! let pipeline = JourneyPipeline::from_config(&layout, &config);
//!
//! let mut pool = DoctorPool::new(config.num_doctors);
//! let mut patient = Patient::new(1, 0.0);
//! let outcome = pipeline.walk(&mut patient, &mut pool, 0.3).unwrap();
//! assert_eq!(outcome.distance, 12.0);
//! ```

pub mod journey;
#[allow(clippy::module_inception)]
pub mod patient;

// Re-export all public types for convenience
pub use journey::{JourneyOutcome, JourneyPipeline, JourneyStage, StageRecord};
pub use patient::Patient;
