//! Enumeration types for the clinic simulator
//!
//! This module contains the department roles that can be placed on the grid,
//! patient outcomes, and the report output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A department role that occupies one grid location
///
/// Doctors are numbered from 1. The ordering (Reception, doctors by number,
/// Pharmacy) is the order a patient visits them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    /// Patient check-in
    Reception,
    /// Consultation room of the doctor with the given 1-based number
    Doctor(u8),
    /// Medication pick-up
    Pharmacy,
}

impl Department {
    /// Every role required for a clinic with `num_doctors` doctors
    pub fn required_roles(num_doctors: usize) -> Vec<Department> {
        let mut roles = Vec::with_capacity(num_doctors + 2);
        roles.push(Department::Reception);
        roles.extend((1..=num_doctors).map(|n| Department::Doctor(n as u8)));
        roles.push(Department::Pharmacy);
        roles
    }

    /// Department of the doctor at the given 0-based pool index
    pub fn doctor_for_index(index: usize) -> Department {
        Department::Doctor((index + 1) as u8)
    }

    /// Key used for this role in configuration files (`reception`, `doctor-1`, `pharmacy`)
    pub fn config_key(&self) -> String {
        match self {
            Department::Reception => "reception".to_string(),
            Department::Doctor(n) => format!("doctor-{}", n),
            Department::Pharmacy => "pharmacy".to_string(),
        }
    }

    /// Short label used when drawing the layout
    pub fn abbreviation(&self) -> String {
        match self {
            Department::Reception => "REC".to_string(),
            Department::Doctor(n) => format!("DR{}", n),
            Department::Pharmacy => "PHA".to_string(),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Department::Reception => write!(f, "Reception"),
            Department::Doctor(n) => write!(f, "Doctor {}", n),
            Department::Pharmacy => write!(f, "Pharmacy"),
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "reception" => return Ok(Department::Reception),
            "pharmacy" => return Ok(Department::Pharmacy),
            _ => {}
        }

        let number = normalized
            .strip_prefix("doctor")
            .map(|rest| rest.trim_start_matches(['-', '_', ' ']))
            .ok_or_else(|| format!("Unknown department: {}", s))?;

        match number.parse::<u8>() {
            Ok(n) if n > 0 => Ok(Department::Doctor(n)),
            _ => Err(format!("Unknown department: {}", s)),
        }
    }
}

/// Why a patient left without being served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAwayReason {
    /// Arrived after the clinic had already closed
    ArrivedAfterClosing,
    /// Started the journey but would only finish after closing
    JourneyOverran,
}

impl fmt::Display for TurnAwayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnAwayReason::ArrivedAfterClosing => write!(f, "Arrived After Closing"),
            TurnAwayReason::JourneyOverran => write!(f, "Journey Overran Closing"),
        }
    }
}

/// Terminal outcome of one patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientOutcome {
    /// Completed the journey before closing time
    Served,
    /// Excluded from the served count
    TurnedAway(TurnAwayReason),
}

impl PatientOutcome {
    /// Whether this outcome counts towards patients seen
    pub fn is_served(&self) -> bool {
        matches!(self, PatientOutcome::Served)
    }
}

impl fmt::Display for PatientOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientOutcome::Served => write!(f, "Served"),
            PatientOutcome::TurnedAway(reason) => write!(f, "Turned Away ({})", reason),
        }
    }
}

/// Output formats for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
