//! Patient record
//!
//! Patients are ephemeral: one is created per arrival, walked through the
//! journey, classified, and dropped once its effect is in the metrics.

use crate::types::PatientOutcome;
use serde::{Deserialize, Serialize};

/// One patient moving through the clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// 1-based arrival order
    pub index: usize,
    /// Hours after opening at which the patient arrived
    pub arrival_time: f64,
    /// Current position of the patient in simulated time
    pub cursor: f64,
    /// Terminal outcome, once classified
    pub outcome: Option<PatientOutcome>,
}

impl Patient {
    /// A patient arriving at `arrival_time`
    pub fn new(index: usize, arrival_time: f64) -> Self {
        Self { index, arrival_time, cursor: arrival_time, outcome: None }
    }

    /// Move the patient's cursor forward
    pub fn spend(&mut self, hours: f64) -> f64 {
        if hours > 0.0 {
            self.cursor += hours;
        }
        self.cursor
    }

    /// Hours spent in the clinic so far
    pub fn time_in_clinic(&self) -> f64 {
        self.cursor - self.arrival_time
    }

    /// Record the terminal outcome
    pub fn finish(&mut self, outcome: PatientOutcome) {
        self.outcome = Some(outcome);
    }

    /// Whether the patient has been classified
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}
