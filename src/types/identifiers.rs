//! Identifier types for the clinic simulator
//!
//! Grid locations are numbered row-major starting at 1, so on a 3x3 grid
//! location 1 is the top-left cell `(0, 0)` and location 9 is `(2, 2)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an assignable grid location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u32);

impl LocationId {
    /// Create a location identifier from its 1-based number
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The 1-based location number
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl From<u32> for LocationId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L_{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = String;

    /// Accepts both the bare number (`9`) and the display label (`L_9`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("L_")
            .or_else(|| trimmed.strip_prefix("l_"))
            .unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(LocationId)
            .map_err(|_| format!("Invalid location identifier: {}", s))
    }
}
