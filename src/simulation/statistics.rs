//! Statistics collection and reporting
//!
//! [`ClinicMetrics`] accumulates per-patient results during a run and is read
//! once at the end through [`ClinicMetrics::snapshot`].

use crate::simulation::doctor_pool::DoctorAssignment;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::TurnAwayReason;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three headline results of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Patients whose journey finished by closing time
    pub patients_seen: usize,
    /// Patients turned away at the door or after overrunning closing time
    pub patients_left: usize,
    /// Grid cells walked by all patients that started a journey
    pub total_distance: f64,
}

/// Final state of the metrics after a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Patients whose journey finished by closing time
    pub patients_seen: usize,
    /// Patients turned away for any reason
    pub patients_left: usize,
    /// Grid cells walked by all patients that started a journey
    pub total_distance: f64,
    /// Patients who arrived after closing
    pub left_at_door: usize,
    /// Patients whose journey would have ended after closing
    pub left_after_overrun: usize,
    /// Sum of doctor queueing waits in hours
    pub total_wait: f64,
    /// Longest single doctor queueing wait in hours
    pub max_wait: f64,
    /// Consultations handled per doctor, by 0-based index
    pub patients_per_doctor: Vec<usize>,
    /// Completion time of the last patient served, if any
    pub last_completion: Option<f64>,
}

impl MetricsSnapshot {
    /// Headline results
    pub fn outcome(&self) -> SimulationOutcome {
        SimulationOutcome {
            patients_seen: self.patients_seen,
            patients_left: self.patients_left,
            total_distance: self.total_distance,
        }
    }

    /// Every patient processed
    pub fn total_patients(&self) -> usize {
        self.patients_seen + self.patients_left
    }

    /// Patients that reached the doctor stage
    pub fn consultations(&self) -> usize {
        self.patients_per_doctor.iter().sum()
    }

    /// Percentage of patients served
    pub fn served_percentage(&self) -> f64 {
        if self.total_patients() == 0 {
            0.0
        } else {
            (self.patients_seen as f64 / self.total_patients() as f64) * 100.0
        }
    }

    /// Mean doctor queueing wait in hours
    pub fn average_wait(&self) -> f64 {
        let consultations = self.consultations();
        if consultations == 0 {
            0.0
        } else {
            self.total_wait / consultations as f64
        }
    }

    /// Mean cells walked per patient that started a journey
    pub fn average_distance(&self) -> f64 {
        let walkers = self.patients_seen + self.left_after_overrun;
        if walkers == 0 {
            0.0
        } else {
            self.total_distance / walkers as f64
        }
    }

    /// Text report of the run
    pub fn generate_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Clinic Simulation Results\n");
        output.push_str("=========================\n\n");

        output.push_str(&format!("Patients Seen: {}\n", self.patients_seen));
        output.push_str(&format!(
            "Patients Left Without Service: {} ({} arrived after closing, {} overran closing)\n",
            self.patients_left, self.left_at_door, self.left_after_overrun
        ));
        output.push_str(&format!("Total Distance Walked: {}\n", self.total_distance));
        output.push_str(&format!("Served Rate: {:.1}%\n\n", self.served_percentage()));

        output.push_str("Doctor Queue:\n");
        output.push_str(&format!(
            "   Average Wait: {:.2} h (max {:.2} h)\n",
            self.average_wait(),
            self.max_wait
        ));
        for (index, count) in self.patients_per_doctor.iter().enumerate() {
            output.push_str(&format!("   Doctor {}: {} consultations\n", index + 1, count));
        }

        if let Some(last) = self.last_completion {
            output.push_str(&format!("\nLast Patient Served At: {:.2} h\n", last));
        }

        output
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seen={} left={} distance={}",
            self.patients_seen, self.patients_left, self.total_distance
        )
    }
}

/// Accumulators mutated once per patient
#[derive(Debug, Clone)]
pub struct ClinicMetrics {
    served: usize,
    left_at_door: usize,
    left_after_overrun: usize,
    total_distance: f64,
    total_wait: f64,
    max_wait: f64,
    patients_per_doctor: Vec<usize>,
    last_completion: Option<f64>,
}

impl ClinicMetrics {
    /// Empty metrics for a pool of `num_doctors`
    pub fn new(num_doctors: usize) -> Self {
        Self {
            served: 0,
            left_at_door: 0,
            left_after_overrun: 0,
            total_distance: 0.0,
            total_wait: 0.0,
            max_wait: 0.0,
            patients_per_doctor: vec![0; num_doctors],
            last_completion: None,
        }
    }

    /// Count a served patient
    pub fn record_served(&mut self) {
        self.served += 1;
    }

    /// Note when a served patient reached the exit
    pub fn record_completion(&mut self, completion_time: f64) {
        self.last_completion = Some(match self.last_completion {
            Some(last) => last.max(completion_time),
            None => completion_time,
        });
    }

    /// Count a patient who left without service
    pub fn record_turned_away(&mut self, reason: TurnAwayReason) {
        match reason {
            TurnAwayReason::ArrivedAfterClosing => self.left_at_door += 1,
            TurnAwayReason::JourneyOverran => self.left_after_overrun += 1,
        }
    }

    /// Add walked distance
    ///
    /// Fails with [`SimulationError::InvalidMetric`] on a negative or
    /// non-finite increment; the total is left untouched.
    pub fn add_distance(&mut self, distance: f64) -> SimulationResult<()> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SimulationError::InvalidMetric(distance));
        }
        self.total_distance += distance;
        Ok(())
    }

    /// Record a doctor consultation
    pub fn record_consultation(&mut self, assignment: &DoctorAssignment) {
        if let Some(count) = self.patients_per_doctor.get_mut(assignment.doctor_index) {
            *count += 1;
        }
        self.total_wait += assignment.wait_time;
        self.max_wait = self.max_wait.max(assignment.wait_time);
    }

    /// Patients served so far
    pub fn served(&self) -> usize {
        self.served
    }

    /// Patients turned away so far
    pub fn turned_away(&self) -> usize {
        self.left_at_door + self.left_after_overrun
    }

    /// Distance walked so far
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Final values
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            patients_seen: self.served,
            patients_left: self.turned_away(),
            total_distance: self.total_distance,
            left_at_door: self.left_at_door,
            left_after_overrun: self.left_after_overrun,
            total_wait: self.total_wait,
            max_wait: self.max_wait,
            patients_per_doctor: self.patients_per_doctor.clone(),
            last_completion: self.last_completion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_start_empty() {
        let snapshot = ClinicMetrics::new(2).snapshot();
        assert_eq!(snapshot.patients_seen, 0);
        assert_eq!(snapshot.patients_left, 0);
        assert_eq!(snapshot.total_distance, 0.0);
        assert_eq!(snapshot.patients_per_doctor, vec![0, 0]);
        assert_eq!(snapshot.served_percentage(), 0.0);
        assert_eq!(snapshot.average_wait(), 0.0);
        assert!(snapshot.last_completion.is_none());
    }

    #[test]
    fn test_record_outcomes() {
        let mut metrics = ClinicMetrics::new(2);
        metrics.record_served();
        metrics.record_served();
        metrics.record_turned_away(TurnAwayReason::ArrivedAfterClosing);
        metrics.record_turned_away(TurnAwayReason::JourneyOverran);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.patients_seen, 2);
        assert_eq!(snapshot.patients_left, 2);
        assert_eq!(snapshot.left_at_door, 1);
        assert_eq!(snapshot.left_after_overrun, 1);
        assert!(snapshot.last_completion.is_none());
        assert_eq!(snapshot.served_percentage(), 50.0);
    }

    #[test]
    fn test_completion_keeps_latest() {
        let mut metrics = ClinicMetrics::new(1);
        metrics.record_completion(1.2);
        metrics.record_completion(0.9);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.last_completion, Some(1.2));
        assert_eq!(snapshot.patients_seen, 0);
    }

    #[test]
    fn test_negative_distance_rejected() {
        let mut metrics = ClinicMetrics::new(1);
        metrics.add_distance(4.0).unwrap();
        assert!(matches!(metrics.add_distance(-1.0), Err(SimulationError::InvalidMetric(_))));
        assert!(metrics.add_distance(f64::NAN).is_err());
        assert_eq!(metrics.total_distance(), 4.0);
    }

    #[test]
    fn test_consultation_tracking() {
        let mut metrics = ClinicMetrics::new(2);
        metrics.record_consultation(&DoctorAssignment {
            doctor_index: 0,
            wait_time: 0.0,
            consult_duration: 0.3,
        });
        metrics.record_consultation(&DoctorAssignment {
            doctor_index: 1,
            wait_time: 0.2,
            consult_duration: 0.4,
        });
        metrics.record_consultation(&DoctorAssignment {
            doctor_index: 1,
            wait_time: 0.4,
            consult_duration: 0.4,
        });

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.patients_per_doctor, vec![1, 2]);
        assert_eq!(snapshot.consultations(), 3);
        assert!((snapshot.average_wait() - 0.2).abs() < 1e-12);
        assert_eq!(snapshot.max_wait, 0.4);
    }

    #[test]
    fn test_outcome_and_report() {
        let mut metrics = ClinicMetrics::new(2);
        metrics.record_served();
        metrics.add_distance(12.0).unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(
            snapshot.outcome(),
            SimulationOutcome { patients_seen: 1, patients_left: 0, total_distance: 12.0 }
        );
        assert_eq!(snapshot.average_distance(), 12.0);

        let report = snapshot.generate_report();
        assert!(report.contains("Patients Seen: 1"));
        assert!(report.contains("Total Distance Walked: 12"));
        assert!(report.contains("Doctor 2: 0 consultations"));
        assert_eq!(snapshot.to_string(), "seen=1 left=0 distance=12");
    }
}
