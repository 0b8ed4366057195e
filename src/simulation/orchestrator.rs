//! Main simulation orchestrator
//!
//! This module contains the ClinicSimulation and the main simulation loop.

use crate::facility::FacilityLayout;
use crate::patient::{JourneyPipeline, Patient};
use crate::simulation::{
    ArrivalProcess, ClinicMetrics, DoctorPool, DurationSource, MetricsSnapshot, RandomDurations,
    SimulationOutcome, SimulationResult,
};
use crate::types::{PatientOutcome, SimulationConfig, TurnAwayReason};
use tracing::{debug, info, instrument, warn};

/// Scores one clinic layout
///
/// Construction validates the configuration and builds the layout once; each
/// call to [`run`](Self::run) starts from idle doctors and empty metrics.
#[derive(Debug, Clone)]
pub struct ClinicSimulation {
    config: SimulationConfig,
    layout: FacilityLayout,
}

impl ClinicSimulation {
    /// Validate a configuration and build its layout
    #[instrument(skip(config), fields(grid_size = config.grid_size, num_patients = config.num_patients))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let layout = FacilityLayout::from_config(&config)?;

        info!(
            "Initialized clinic simulation: {} patients, {} doctors on a {}x{} grid",
            config.num_patients, config.num_doctors, config.grid_size, config.grid_size
        );
        for (department, location) in layout.assignments() {
            debug!("{} placed at {}", department, location);
        }

        Ok(Self { config, layout })
    }

    /// Configuration of the run
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The validated layout
    pub fn layout(&self) -> &FacilityLayout {
        &self.layout
    }

    /// Run once with the configured seed
    pub fn run(&self) -> SimulationResult<MetricsSnapshot> {
        self.run_with_seed(self.config.seed)
    }

    /// Run once with uniform draws from the given seed, or entropy if `None`
    pub fn run_with_seed(&self, seed: Option<u64>) -> SimulationResult<MetricsSnapshot> {
        let mut source = RandomDurations::from_seed(
            seed,
            self.config.arrival_gap_range,
            self.config.consult_duration_range,
        );
        self.run_with(&mut source)
    }

    /// Run once, taking every random draw from `source`
    #[instrument(skip(self, source), fields(num_patients = self.config.num_patients))]
    pub fn run_with<S: DurationSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> SimulationResult<MetricsSnapshot> {
        let mut pool = DoctorPool::new(self.config.num_doctors);
        let mut metrics = ClinicMetrics::new(self.config.num_doctors);
        let mut arrivals =
            ArrivalProcess::new(self.config.num_patients, self.config.clinic_close_time);
        let pipeline = JourneyPipeline::from_config(&self.layout, &self.config);

        while let Some(arrival) = arrivals.next_arrival(source) {
            let mut patient = Patient::new(arrival.patient_index, arrival.time);
            pool.elapse(arrival.gap);

            if arrival.after_closing {
                debug!(
                    patient = patient.index,
                    arrival_time = arrival.time,
                    "Patient arrived after closing"
                );
                patient.finish(PatientOutcome::TurnedAway(TurnAwayReason::ArrivedAfterClosing));
                metrics.record_turned_away(TurnAwayReason::ArrivedAfterClosing);
                continue;
            }

            let consult_duration = source.consultation_duration();
            let journey = pipeline.walk(&mut patient, &mut pool, consult_duration)?;

            // Distance counts even if the patient is turned away below
            metrics.add_distance(journey.distance)?;
            metrics.record_consultation(&journey.doctor);

            if arrivals.clock().is_after_closing(journey.completion_time) {
                warn!(
                    patient = patient.index,
                    completion_time = journey.completion_time,
                    closing_time = arrivals.clock().closing_time(),
                    "Patient journey overran closing time"
                );
                patient.finish(PatientOutcome::TurnedAway(TurnAwayReason::JourneyOverran));
                metrics.record_turned_away(TurnAwayReason::JourneyOverran);
            } else {
                patient.finish(PatientOutcome::Served);
                metrics.record_served();
                metrics.record_completion(journey.completion_time);
            }

            debug!(
                patient = patient.index,
                arrival_time = patient.arrival_time,
                completion_time = journey.completion_time,
                doctor = journey.doctor.doctor_index + 1,
                wait = journey.doctor.wait_time,
                distance = journey.distance,
                "Patient processed"
            );
        }

        let snapshot = metrics.snapshot();
        crate::sim_event!(
            info,
            "Simulation run complete",
            patients_seen = snapshot.patients_seen,
            patients_left = snapshot.patients_left,
            total_distance = snapshot.total_distance,
        );
        Ok(snapshot)
    }
}

/// Validate, build and run a configuration once
pub fn simulate(config: SimulationConfig) -> SimulationResult<SimulationOutcome> {
    let simulation = ClinicSimulation::new(config)?;
    Ok(simulation.run()?.outcome())
}
