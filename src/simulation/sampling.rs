//! Random draws for arrivals and consultations
//!
//! Every random quantity in a run comes through a [`DurationSource`], so a run
//! is fully determined by its configuration and the source it is given.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::debug;

/// Supplier of the two random durations the simulation needs
pub trait DurationSource {
    /// Hours between the previous arrival and the next one
    fn inter_arrival_gap(&mut self) -> f64;

    /// Hours a doctor spends with one patient
    fn consultation_duration(&mut self) -> f64;
}

/// Uniform draws over inclusive hour ranges
#[derive(Debug, Clone)]
pub struct RandomDurations<R: Rng> {
    rng: R,
    gap: Uniform<f64>,
    consult: Uniform<f64>,
}

impl<R: Rng> RandomDurations<R> {
    /// Draw from the given ranges with the given generator
    ///
    /// Ranges are inclusive, so `(x, x)` always yields `x`. Bounds must already
    /// be validated (`min <= max`, both finite).
    pub fn new(rng: R, gap_range: (f64, f64), consult_range: (f64, f64)) -> Self {
        Self {
            rng,
            gap: Uniform::new_inclusive(gap_range.0, gap_range.1),
            consult: Uniform::new_inclusive(consult_range.0, consult_range.1),
        }
    }
}

impl RandomDurations<StdRng> {
    /// Seeded generator when a seed is given, entropy otherwise
    pub fn from_seed(
        seed: Option<u64>,
        gap_range: (f64, f64),
        consult_range: (f64, f64),
    ) -> Self {
        let rng = match seed {
            Some(seed) => {
                debug!("Using deterministic seed: {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => {
                debug!("Using entropy-based random seed");
                StdRng::from_entropy()
            }
        };
        Self::new(rng, gap_range, consult_range)
    }
}

impl<R: Rng> DurationSource for RandomDurations<R> {
    fn inter_arrival_gap(&mut self) -> f64 {
        self.gap.sample(&mut self.rng)
    }

    fn consultation_duration(&mut self) -> f64 {
        self.consult.sample(&mut self.rng)
    }
}

/// Replays fixed sequences of durations
///
/// Once a queue is exhausted its fallback value is returned for every further
/// draw.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDurations {
    gaps: VecDeque<f64>,
    consults: VecDeque<f64>,
    fallback_gap: f64,
    fallback_consult: f64,
}

impl ScriptedDurations {
    /// Same gap and consultation duration for every patient
    pub fn constant(gap: f64, consult: f64) -> Self {
        Self { fallback_gap: gap, fallback_consult: consult, ..Default::default() }
    }

    /// Explicit per-patient sequences; the last value of each repeats
    pub fn sequence(gaps: Vec<f64>, consults: Vec<f64>) -> Self {
        let fallback_gap = gaps.last().copied().unwrap_or(0.0);
        let fallback_consult = consults.last().copied().unwrap_or(0.0);
        Self { gaps: gaps.into(), consults: consults.into(), fallback_gap, fallback_consult }
    }
}

impl DurationSource for ScriptedDurations {
    fn inter_arrival_gap(&mut self) -> f64 {
        self.gaps.pop_front().unwrap_or(self.fallback_gap)
    }

    fn consultation_duration(&mut self) -> f64 {
        self.consults.pop_front().unwrap_or(self.fallback_consult)
    }
}

impl<T: DurationSource + ?Sized> DurationSource for &mut T {
    fn inter_arrival_gap(&mut self) -> f64 {
        (**self).inter_arrival_gap()
    }

    fn consultation_duration(&mut self) -> f64 {
        (**self).consultation_duration()
    }
}
