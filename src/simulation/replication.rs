//! Repeated runs of one layout
//!
//! Replication `i` uses seed `seed + i` when the configuration has a seed, so a
//! seeded batch is reproducible as a whole. Without a seed every run draws
//! fresh entropy.

use crate::simulation::{ClinicSimulation, SimulationOutcome, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Mean, minimum and maximum of one output over all replications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl SummaryStats {
    /// Summarise a non-empty set of values; an empty set yields zeros
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self { mean: 0.0, min: 0.0, max: 0.0 };
        }
        Self { mean: sum / count as f64, min, max }
    }
}

/// Aggregated results of a batch of replications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    /// Number of runs
    pub replications: usize,
    /// Patients seen per run
    pub patients_seen: SummaryStats,
    /// Patients left per run
    pub patients_left: SummaryStats,
    /// Total distance per run
    pub total_distance: SummaryStats,
    /// Every run's outcome, in seed order
    pub runs: Vec<SimulationOutcome>,
}

impl ReplicationSummary {
    /// Text report of the batch
    pub fn generate_report(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Replications: {}\n", self.replications));
        for (label, stats) in [
            ("Patients Seen", self.patients_seen),
            ("Patients Left", self.patients_left),
            ("Total Distance", self.total_distance),
        ] {
            output.push_str(&format!(
                "   {}: mean {:.2} (min {}, max {})\n",
                label, stats.mean, stats.min, stats.max
            ));
        }
        output
    }
}

/// Runs a simulation several times
#[derive(Debug)]
pub struct ReplicationRunner<'a> {
    simulation: &'a ClinicSimulation,
}

impl<'a> ReplicationRunner<'a> {
    /// Runner for a built simulation
    pub fn new(simulation: &'a ClinicSimulation) -> Self {
        Self { simulation }
    }

    /// Run `count` replications and summarise them
    pub fn run(&self, count: usize) -> SimulationResult<ReplicationSummary> {
        let span = crate::perf_span!("replications", count = count);
        let _enter = span.enter();

        let base_seed = self.simulation.config().seed;
        let mut runs = Vec::with_capacity(count);

        for replication in 0..count {
            let seed = base_seed.map(|seed| seed.wrapping_add(replication as u64));
            let outcome = self.simulation.run_with_seed(seed)?.outcome();
            debug!(replication, ?seed, ?outcome, "Replication finished");
            runs.push(outcome);
        }

        let summary = ReplicationSummary {
            replications: count,
            patients_seen: SummaryStats::from_values(runs.iter().map(|r| r.patients_seen as f64)),
            patients_left: SummaryStats::from_values(runs.iter().map(|r| r.patients_left as f64)),
            total_distance: SummaryStats::from_values(runs.iter().map(|r| r.total_distance)),
            runs,
        };

        info!(
            "Completed {} replications: mean seen {:.2}, mean distance {:.2}",
            count, summary.patients_seen.mean, summary.total_distance.mean
        );
        Ok(summary)
    }
}
