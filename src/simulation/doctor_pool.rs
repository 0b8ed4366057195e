//! Pool of interchangeable doctors
//!
//! Each doctor carries a busy-until value: the hours, measured from the current
//! instant, before the doctor is free again. Zero means idle.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Result of routing one patient to a doctor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoctorAssignment {
    /// 0-based index of the chosen doctor
    pub doctor_index: usize,
    /// Hours the patient queued before the doctor was free
    pub wait_time: f64,
    /// Hours of the consultation itself
    pub consult_duration: f64,
}

/// Busy-until state of a fixed set of doctors
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorPool {
    busy_until: Vec<f64>,
}

impl DoctorPool {
    /// All doctors idle
    pub fn new(num_doctors: usize) -> Self {
        Self { busy_until: vec![0.0; num_doctors] }
    }

    /// Number of doctors in the pool
    pub fn size(&self) -> usize {
        self.busy_until.len()
    }

    /// Current busy-until values, by doctor index
    pub fn busy_until(&self) -> &[f64] {
        &self.busy_until
    }

    /// Sum of all busy-until values
    pub fn total_busy(&self) -> f64 {
        self.busy_until.iter().sum()
    }

    /// Let `hours` pass for every doctor, clamping at idle
    pub fn elapse(&mut self, hours: f64) {
        if hours <= 0.0 {
            return;
        }
        for busy in &mut self.busy_until {
            *busy = (*busy - hours).max(0.0);
        }
    }

    /// Route a patient to the next available doctor
    ///
    /// Picks the doctor with the smallest busy-until value, lowest index first
    /// among ties. That value is the patient's wait; all doctors advance by it,
    /// then the chosen doctor becomes busy for `consult_duration`.
    ///
    /// Returns `None` only for an empty pool.
    pub fn acquire(&mut self, consult_duration: f64) -> Option<DoctorAssignment> {
        let (doctor_index, wait_time) = self
            .busy_until
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, busy)| match best {
                Some((_, best_busy)) if best_busy <= busy => best,
                _ => Some((index, busy)),
            })?;

        self.elapse(wait_time);
        let consult_duration = consult_duration.max(0.0);
        self.busy_until[doctor_index] = consult_duration;

        trace!(
            doctor_index,
            wait_time,
            consult_duration,
            "Patient routed to doctor"
        );

        Some(DoctorAssignment { doctor_index, wait_time, consult_duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_is_idle() {
        let pool = DoctorPool::new(2);
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.busy_until(), &[0.0, 0.0]);
        assert_eq!(pool.total_busy(), 0.0);
    }

    #[test]
    fn test_tie_break_lowest_index() {
        let mut pool = DoctorPool::new(3);
        let first = pool.acquire(0.3).unwrap();
        assert_eq!(first.doctor_index, 0);
        assert_eq!(first.wait_time, 0.0);

        let second = pool.acquire(0.3).unwrap();
        assert_eq!(second.doctor_index, 1);
        assert_eq!(second.wait_time, 0.0);
    }

    #[test]
    fn test_wait_is_minimum_busy_value() {
        let mut pool = DoctorPool::new(2);
        pool.acquire(0.5).unwrap();
        pool.acquire(0.3).unwrap();

        let third = pool.acquire(0.4).unwrap();
        assert_eq!(third.doctor_index, 1);
        assert!((third.wait_time - 0.3).abs() < 1e-12);
        assert!((pool.busy_until()[0] - 0.2).abs() < 1e-12);
        assert!((pool.busy_until()[1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_elapse_clamps_at_zero() {
        let mut pool = DoctorPool::new(2);
        pool.acquire(0.5).unwrap();
        pool.elapse(0.2);
        assert!((pool.busy_until()[0] - 0.3).abs() < 1e-12);
        pool.elapse(1.0);
        assert_eq!(pool.busy_until(), &[0.0, 0.0]);
    }

    #[test]
    fn test_empty_pool_cannot_acquire() {
        let mut pool = DoctorPool::new(0);
        assert!(pool.acquire(0.3).is_none());
    }
}
