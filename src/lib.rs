//! Clinic Flow Simulator
//!
//! A discrete-event simulation that scores a clinic floor plan by how many
//! patients it can serve before closing and how far they have to walk.
//!
//! # Overview
//!
//! The clinic is a square grid of locations. Reception, one or more doctors and
//! a pharmacy are each placed on a distinct location; patients enter at one
//! boundary point, visit the departments in a fixed order and leave through
//! another. Walking is measured in Manhattan distance.
//!
//! ## Key Features
//!
//! - **Grid Layouts**: validated placement of departments with entry and exit points
//! - **Doctor Queueing**: interchangeable doctors with busy-until bookkeeping
//! - **Closing Time**: patients who arrive late or finish late are turned away
//! - **Reproducible Runs**: seeded randomness and batches of replications
//! - **Layered Configuration**: CLI flags over a JSON file over defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use clinic_flow_sim::*;
//!
//! let config = SimulationConfig {
//!     num_patients: 20,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let simulation = ClinicSimulation::new(config)?;
//! let snapshot = simulation.run()?;
//! println!(
//!     "seen {} / left {} / walked {}",
//!     snapshot.patients_seen, snapshot.patients_left, snapshot.total_distance
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`facility`]: Grid geometry and department layout
//! - [`patient`]: Patients and the journey pipeline
//! - [`simulation`]: Run loop, doctor pool, metrics and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Facility   │    │   Patient   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Grid        │◄───┤ Journey     │
//! │ Enums       │    │ Layout      │    │ Pipeline    │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        │           ┌─────────────┐             │
//!        │           │ Simulation  │             │
//!        └───────────┤ Orchestrator├─────────────┘
//!                    │ DoctorPool  │
//!                    │ Metrics     │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod facility;
pub mod patient;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigValidationError,
    // Enums
    Department,
    // Identifiers
    LocationId,
    OutputFormat,
    PatientOutcome,
    // Configuration
    SimulationConfig,
    TurnAwayReason,
};

// Facility types and functionality
pub use facility::{BoundaryPoint, Coordinate, FacilityLayout, Grid, Waypoint};

// Patient types and functionality
pub use patient::{JourneyOutcome, JourneyPipeline, Patient};

// Simulation types and functionality
pub use simulation::{
    simulate, ClinicMetrics, ClinicSimulation, DoctorPool, DurationSource, MetricsSnapshot,
    RandomDurations, ReplicationRunner, ReplicationSummary, ScriptedDurations, SimulationError,
    SimulationOutcome, SimulationResult,
};
