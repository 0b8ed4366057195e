//! Clinic floor plan
//!
//! This module models the physical side of the clinic: the square grid of
//! locations with its Entry and Exit points, and the placement of departments
//! onto that grid.
//!
//! # Overview
//!
//! - **Grid**: location numbering, boundary points, Manhattan distances
//! - **Waypoint**: a location or boundary point, resolved transparently
//! - **FacilityLayout**: validated one-to-one department placement
//!
//! # Usage Example
//!
//! ```rust
//! use clinic_flow_sim::facility::*;
//! use clinic_flow_sim::types::*;
//!
//! let layout = FacilityLayout::from_config(&SimulationConfig::default()).unwrap();
//! let reception = layout.waypoint(Department::Reception).unwrap();
//!
//! assert_eq!(layout.distance(BoundaryPoint::Entry, reception).unwrap(), 4);
//! println!("{}", layout.render_text());
//! ```

pub mod grid;
pub mod layout;

// Re-export all public types for convenience
pub use grid::{BoundaryPoint, Coordinate, Grid, Waypoint};
pub use layout::FacilityLayout;
