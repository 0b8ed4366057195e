//! Grid geometry and Manhattan distances
//!
//! The clinic floor is an `N x N` grid of cells. Each cell is an assignable
//! location numbered row-major from 1. Entry and Exit are fixed boundary points
//! with their own coordinates; they may share a cell with a location but are
//! never assignable themselves.

use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::config::defaults::MAX_GRID_SIZE;
use crate::types::LocationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index, 0 at the top
    pub row: usize,
    /// Column index, 0 at the left
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed boundary points of the clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryPoint {
    /// Where patients come in
    Entry,
    /// Where patients leave
    Exit,
}

impl fmt::Display for BoundaryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPoint::Entry => write!(f, "Entry"),
            BoundaryPoint::Exit => write!(f, "Exit"),
        }
    }
}

/// Anything a patient can walk to or from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waypoint {
    /// A numbered grid location
    Location(LocationId),
    /// Entry or Exit
    Boundary(BoundaryPoint),
}

impl From<LocationId> for Waypoint {
    fn from(location: LocationId) -> Self {
        Waypoint::Location(location)
    }
}

impl From<BoundaryPoint> for Waypoint {
    fn from(point: BoundaryPoint) -> Self {
        Waypoint::Boundary(point)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::Location(location) => write!(f, "{}", location),
            Waypoint::Boundary(point) => write!(f, "{}", point),
        }
    }
}

/// Square grid with its Entry and Exit points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    entry: Coordinate,
    exit: Coordinate,
}

impl Grid {
    /// Create a grid with explicit Entry and Exit coordinates
    pub fn new(size: usize, entry: Coordinate, exit: Coordinate) -> SimulationResult<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(SimulationError::configuration_error(format!(
                "Grid size must be between 1 and {}, got {}",
                MAX_GRID_SIZE, size
            )));
        }

        let grid = Self { size, entry, exit };
        for (point, coordinate) in [(BoundaryPoint::Entry, entry), (BoundaryPoint::Exit, exit)] {
            if !grid.contains_coordinate(coordinate) {
                return Err(SimulationError::configuration_error(format!(
                    "{} point {} lies outside the {}x{} grid",
                    point, coordinate, size, size
                )));
            }
        }

        Ok(grid)
    }

    /// Create a grid with Entry at the top-left and Exit at the bottom-right corner
    pub fn with_corner_boundaries(size: usize) -> SimulationResult<Self> {
        let far = size.saturating_sub(1);
        Self::new(size, Coordinate::new(0, 0), Coordinate::new(far, far))
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of assignable locations
    pub fn location_count(&self) -> usize {
        self.size * self.size
    }

    /// Coordinate of a boundary point
    pub fn boundary(&self, point: BoundaryPoint) -> Coordinate {
        match point {
            BoundaryPoint::Entry => self.entry,
            BoundaryPoint::Exit => self.exit,
        }
    }

    /// Whether the location number exists on this grid
    pub fn contains(&self, location: LocationId) -> bool {
        location.0 >= 1 && (location.0 as usize) <= self.location_count()
    }

    fn contains_coordinate(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.size && coordinate.col < self.size
    }

    /// Coordinate of a numbered location
    pub fn coordinate_of(&self, location: LocationId) -> SimulationResult<Coordinate> {
        if !self.contains(location) {
            return Err(SimulationError::invalid_reference(location.to_string(), self.size));
        }
        let index = location.0 as usize - 1;
        Ok(Coordinate::new(index / self.size, index % self.size))
    }

    /// Location number of a cell
    pub fn location_at(&self, coordinate: Coordinate) -> SimulationResult<LocationId> {
        if !self.contains_coordinate(coordinate) {
            return Err(SimulationError::invalid_reference(coordinate.to_string(), self.size));
        }
        let number = u32::try_from(coordinate.row * self.size + coordinate.col + 1).map_err(|_| {
            SimulationError::configuration_error(format!(
                "Location number for {} does not fit a 32-bit id",
                coordinate
            ))
        })?;
        Ok(LocationId(number))
    }

    /// All location numbers in row-major order
    pub fn locations(&self) -> impl Iterator<Item = LocationId> {
        // Bounded by MAX_GRID_SIZE at construction
        let count = u32::try_from(self.location_count()).unwrap_or(u32::MAX);
        (1..=count).map(LocationId)
    }

    /// Resolve any waypoint to its cell
    pub fn resolve(&self, waypoint: Waypoint) -> SimulationResult<Coordinate> {
        match waypoint {
            Waypoint::Location(location) => self.coordinate_of(location),
            Waypoint::Boundary(point) => Ok(self.boundary(point)),
        }
    }

    /// Manhattan distance between two waypoints of either kind
    pub fn distance(
        &self,
        from: impl Into<Waypoint>,
        to: impl Into<Waypoint>,
    ) -> SimulationResult<u32> {
        let from = self.resolve(from.into())?;
        let to = self.resolve(to.into())?;
        Ok(from.manhattan_distance(&to))
    }
}
