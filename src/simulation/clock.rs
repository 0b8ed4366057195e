//! Simulation clock and patient arrivals
//!
//! The clock only moves when a patient arrives. Service completions are tracked
//! per patient and compared against closing time, but never move the clock.

use crate::simulation::sampling::DurationSource;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Monotonic simulation time in hours since opening
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    now: f64,
    closing_time: f64,
}

impl SimulationClock {
    /// Clock at opening time
    pub fn new(closing_time: f64) -> Self {
        Self { now: 0.0, closing_time }
    }

    /// Current time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Closing time
    pub fn closing_time(&self) -> f64 {
        self.closing_time
    }

    /// Move forward by `hours`; negative steps are ignored
    pub fn advance(&mut self, hours: f64) -> f64 {
        if hours > 0.0 {
            self.now += hours;
        }
        self.now
    }

    /// Whether an instant is strictly after closing
    pub fn is_after_closing(&self, time: f64) -> bool {
        time > self.closing_time
    }

    /// Whether the clock itself has passed closing
    pub fn is_closed(&self) -> bool {
        self.is_after_closing(self.now)
    }
}

/// One generated arrival
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    /// 1-based patient number
    pub patient_index: usize,
    /// Gap since the previous arrival
    pub gap: f64,
    /// Arrival instant
    pub time: f64,
    /// Whether the clinic had already closed at that instant
    pub after_closing: bool,
}

/// Generates `num_patients` arrivals in order, advancing the clock
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    clock: SimulationClock,
    num_patients: usize,
    generated: usize,
}

impl ArrivalProcess {
    /// Arrival process for a clinic closing at `closing_time`
    pub fn new(num_patients: usize, closing_time: f64) -> Self {
        Self { clock: SimulationClock::new(closing_time), num_patients, generated: 0 }
    }

    /// The shared clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Patients not yet generated
    pub fn remaining(&self) -> usize {
        self.num_patients - self.generated
    }

    /// Draw the next gap and advance the clock to the new arrival
    ///
    /// The clock advances even past closing, so once it has passed closing
    /// every later arrival is after closing too.
    pub fn next_arrival<S: DurationSource + ?Sized>(&mut self, source: &mut S) -> Option<Arrival> {
        if self.generated >= self.num_patients {
            return None;
        }

        let gap = source.inter_arrival_gap().max(0.0);
        let time = self.clock.advance(gap);
        self.generated += 1;

        let arrival = Arrival {
            patient_index: self.generated,
            gap,
            time,
            after_closing: self.clock.is_after_closing(time),
        };
        trace!(patient = arrival.patient_index, time, gap, "Patient arrived");
        Some(arrival)
    }
}
