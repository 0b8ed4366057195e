//! Department placement on the grid
//!
//! A [`FacilityLayout`] is the validated, immutable pairing of a [`Grid`] with a
//! one-to-one mapping from department role to grid location.

use crate::facility::grid::{BoundaryPoint, Grid, Waypoint};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{Department, LocationId, SimulationConfig};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A grid with every department placed on a distinct location
#[derive(Debug, Clone)]
pub struct FacilityLayout {
    grid: Grid,
    num_doctors: usize,
    assignments: BTreeMap<Department, LocationId>,
    occupants: HashMap<LocationId, Department>,
}

impl FacilityLayout {
    /// Build the grid and placement described by a configuration
    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let (entry, exit) = config.boundary_points();
        let grid = Grid::new(config.grid_size, entry.into(), exit.into())?;
        Self::new(grid, &config.department_assignment, config.num_doctors)
    }

    /// Build a layout from role names as they appear in configuration
    pub fn new(
        grid: Grid,
        assignment: &BTreeMap<String, LocationId>,
        num_doctors: usize,
    ) -> SimulationResult<Self> {
        let mut typed = BTreeMap::new();
        for (key, location) in assignment {
            let department: Department = key.parse().map_err(|_| {
                SimulationError::configuration_error(format!("Unknown department role '{}'", key))
            })?;
            if typed.insert(department, *location).is_some() {
                return Err(SimulationError::configuration_error(format!(
                    "Department {} is assigned more than once",
                    department
                )));
            }
        }
        Self::from_assignments(grid, typed, num_doctors)
    }

    /// Build a layout from typed department placements
    pub fn from_assignments(
        grid: Grid,
        assignments: BTreeMap<Department, LocationId>,
        num_doctors: usize,
    ) -> SimulationResult<Self> {
        if num_doctors == 0 || num_doctors > u8::MAX as usize {
            return Err(SimulationError::configuration_error(format!(
                "Doctor count must be between 1 and 255, got {}",
                num_doctors
            )));
        }

        let required = Department::required_roles(num_doctors);

        for department in assignments.keys() {
            if !required.contains(department) {
                return Err(SimulationError::configuration_error(format!(
                    "Unknown department role '{}' for a clinic with {} doctors",
                    department.config_key(),
                    num_doctors
                )));
            }
        }

        for department in &required {
            if !assignments.contains_key(department) {
                return Err(SimulationError::configuration_error(format!(
                    "Department {} has no assigned location",
                    department
                )));
            }
        }

        let mut occupants = HashMap::with_capacity(assignments.len());
        for (department, location) in &assignments {
            if !grid.contains(*location) {
                return Err(SimulationError::invalid_reference(location.to_string(), grid.size()));
            }
            if let Some(other) = occupants.insert(*location, *department) {
                return Err(SimulationError::configuration_error(format!(
                    "Departments must be assigned to unique locations: {} and {} share {}",
                    other, department, location
                )));
            }
        }

        debug!(
            "Validated layout on {}x{} grid with {} departments",
            grid.size(),
            grid.size(),
            assignments.len()
        );

        Ok(Self { grid, num_doctors, assignments, occupants })
    }

    /// The underlying grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of doctors the layout was built for
    pub fn num_doctors(&self) -> usize {
        self.num_doctors
    }

    /// Location of a department
    pub fn location(&self, department: Department) -> SimulationResult<LocationId> {
        self.assignments.get(&department).copied().ok_or_else(|| {
            SimulationError::configuration_error(format!(
                "Department {} has no assigned location",
                department
            ))
        })
    }

    /// Department occupying a location, if any
    pub fn department_at(&self, location: LocationId) -> Option<Department> {
        self.occupants.get(&location).copied()
    }

    /// All placements in visiting order
    pub fn assignments(&self) -> impl Iterator<Item = (Department, LocationId)> + '_ {
        self.assignments.iter().map(|(department, location)| (*department, *location))
    }

    /// Waypoint of a department
    pub fn waypoint(&self, department: Department) -> SimulationResult<Waypoint> {
        self.location(department).map(Waypoint::Location)
    }

    /// Manhattan distance between two waypoints
    pub fn distance(
        &self,
        from: impl Into<Waypoint>,
        to: impl Into<Waypoint>,
    ) -> SimulationResult<u32> {
        self.grid.distance(from, to)
    }

    /// Draw the grid as text
    ///
    /// Each cell shows its label, the department placed there, and `IN`/`OUT`
    /// markers for the Entry and Exit points.
    pub fn render_text(&self) -> String {
        let size = self.grid.size();
        let entry = self.grid.boundary(BoundaryPoint::Entry);
        let exit = self.grid.boundary(BoundaryPoint::Exit);

        let mut cells: Vec<(String, String)> = Vec::with_capacity(self.grid.location_count());
        for location in self.grid.locations() {
            let Ok(coordinate) = self.grid.coordinate_of(location) else {
                continue;
            };
            let mut detail = self
                .department_at(location)
                .map(|department| department.abbreviation())
                .unwrap_or_default();
            for (marker, point) in [("IN", entry), ("OUT", exit)] {
                if coordinate == point {
                    if !detail.is_empty() {
                        detail.push(' ');
                    }
                    detail.push_str(marker);
                }
            }
            cells.push((location.to_string(), detail));
        }

        let width = cells
            .iter()
            .map(|(label, detail)| label.len().max(detail.len()))
            .max()
            .unwrap_or(0)
            + 2;
        let border = format!("+{}\n", format!("{}+", "-".repeat(width)).repeat(size));

        let mut output = String::new();
        output.push_str(&border);
        for row in cells.chunks(size) {
            for line in 0..2 {
                output.push('|');
                for (label, detail) in row {
                    let text = if line == 0 { label } else { detail };
                    output.push_str(&format!(" {:<w$} |", text, w = width - 2));
                }
                output.push('\n');
            }
            output.push_str(&border);
        }

        output
    }
}
