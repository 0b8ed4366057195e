//! Patient journey pipeline
//!
//! Every patient walks the same fixed sequence of stages:
//!
//! ```text
//! Entry -> Reception -> Doctor -> Pharmacy -> Exit
//! ```
//!
//! Each stage adds the Manhattan distance walked to reach it and, except for
//! the exit, a service time. The doctor stage also adds the queueing wait and
//! routes the patient to the doctor chosen by the [`DoctorPool`]. The walk from
//! reception is always measured to Doctor 1's room, while the walk on to the
//! pharmacy starts from the room of the doctor actually seen.

use crate::facility::{BoundaryPoint, FacilityLayout, Waypoint};
use crate::patient::Patient;
use crate::simulation::doctor_pool::{DoctorAssignment, DoctorPool};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{Department, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One step of the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JourneyStage {
    /// Check in at reception
    Reception,
    /// Queue for and see a doctor
    Consultation,
    /// Pick up medication
    Pharmacy,
    /// Walk out
    Exit,
}

impl JourneyStage {
    /// The stages in visiting order
    pub const ORDER: [JourneyStage; 4] = [
        JourneyStage::Reception,
        JourneyStage::Consultation,
        JourneyStage::Pharmacy,
        JourneyStage::Exit,
    ];
}

impl fmt::Display for JourneyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyStage::Reception => write!(f, "Reception"),
            JourneyStage::Consultation => write!(f, "Consultation"),
            JourneyStage::Pharmacy => write!(f, "Pharmacy"),
            JourneyStage::Exit => write!(f, "Exit"),
        }
    }
}

/// What happened at one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// The stage
    pub stage: JourneyStage,
    /// Where the patient walked from
    pub from: Waypoint,
    /// Where the patient walked to
    pub to: Waypoint,
    /// Grid cells walked; the consultation leg is measured to Doctor 1's room
    pub distance: u32,
    /// Queueing wait before service
    pub wait: f64,
    /// Service time at the destination
    pub service_time: f64,
    /// Patient's time when leaving the stage
    pub finished_at: f64,
}

/// Result of walking one patient through the clinic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyOutcome {
    /// When the patient reaches the exit
    pub completion_time: f64,
    /// Total grid cells walked
    pub distance: f64,
    /// Doctor routing at the consultation stage
    pub doctor: DoctorAssignment,
    /// Per-stage breakdown in visiting order
    pub stages: Vec<StageRecord>,
}

/// Fixed service times and the layout they apply to
#[derive(Debug, Clone)]
pub struct JourneyPipeline<'a> {
    layout: &'a FacilityLayout,
    reception_duration: f64,
    pharmacy_duration: f64,
    travel_hours_per_cell: f64,
}

impl<'a> JourneyPipeline<'a> {
    /// Pipeline with explicit service times
    pub fn new(layout: &'a FacilityLayout, reception_duration: f64, pharmacy_duration: f64) -> Self {
        Self { layout, reception_duration, pharmacy_duration, travel_hours_per_cell: 0.0 }
    }

    /// Pipeline with the service and travel times of a configuration
    pub fn from_config(layout: &'a FacilityLayout, config: &SimulationConfig) -> Self {
        Self::new(layout, config.reception_duration, config.pharmacy_duration)
            .with_travel_time(config.travel_hours_per_cell)
    }

    /// Charge simulated time for walking
    pub fn with_travel_time(mut self, hours_per_cell: f64) -> Self {
        self.travel_hours_per_cell = hours_per_cell.max(0.0);
        self
    }

    /// Walk a patient from entry to exit
    ///
    /// Advances the patient's cursor through every stage and routes it to a
    /// doctor, mutating `pool` exactly once. `consult_duration` is the drawn
    /// consultation time for this patient.
    pub fn walk(
        &self,
        patient: &mut Patient,
        pool: &mut DoctorPool,
        consult_duration: f64,
    ) -> SimulationResult<JourneyOutcome> {
        let mut stages = Vec::with_capacity(JourneyStage::ORDER.len());
        let mut position = Waypoint::Boundary(BoundaryPoint::Entry);
        let mut total_distance: u32 = 0;
        let mut doctor = None;

        for stage in JourneyStage::ORDER {
            let (measured_to, destination, wait, service_time) = match stage {
                JourneyStage::Reception => {
                    let reception = self.layout.waypoint(Department::Reception)?;
                    (reception, reception, 0.0, self.reception_duration)
                }
                JourneyStage::Consultation => {
                    let assignment = pool.acquire(consult_duration).ok_or_else(|| {
                        SimulationError::configuration_error("Doctor pool is empty")
                    })?;
                    doctor = Some(assignment);
                    (
                        self.layout.waypoint(Department::Doctor(1))?,
                        self.layout
                            .waypoint(Department::doctor_for_index(assignment.doctor_index))?,
                        assignment.wait_time,
                        assignment.consult_duration,
                    )
                }
                JourneyStage::Pharmacy => {
                    let pharmacy = self.layout.waypoint(Department::Pharmacy)?;
                    (pharmacy, pharmacy, 0.0, self.pharmacy_duration)
                }
                JourneyStage::Exit => {
                    let exit = Waypoint::Boundary(BoundaryPoint::Exit);
                    (exit, exit, 0.0, 0.0)
                }
            };

            let distance = self.layout.distance(position, measured_to)?;
            total_distance += distance;

            patient.spend(distance as f64 * self.travel_hours_per_cell);
            patient.spend(wait);
            let finished_at = patient.spend(service_time);

            debug!(
                patient = patient.index,
                stage = %stage,
                from = %position,
                to = %destination,
                distance,
                wait,
                finished_at,
                "Journey stage complete"
            );

            stages.push(StageRecord {
                stage,
                from: position,
                to: destination,
                distance,
                wait,
                service_time,
                finished_at,
            });
            position = destination;
        }

        let doctor = doctor
            .ok_or_else(|| SimulationError::configuration_error("Journey skipped the doctor"))?;

        Ok(JourneyOutcome {
            completion_time: patient.cursor,
            distance: total_distance as f64,
            doctor,
            stages,
        })
    }
}
