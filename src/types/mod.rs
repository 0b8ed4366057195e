//! Core types and identifiers for the clinic simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: row-major numbered grid locations
//! - **Enums**: department roles, patient outcomes, output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_flow_sim::types::*;
//!
//! let reception: Department = "reception".parse().unwrap();
//! assert_eq!(reception, Department::Reception);
//!
//! let config = SimulationConfig {
//!     num_patients: 5,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.location_of(Department::Reception), Some(LocationId(9)));
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
