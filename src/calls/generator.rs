//! Arrival generation
//!
//! Produces the random stream of calls for both request classes over the
//! simulated horizon. Per day and per class a Poisson draw fixes the number of
//! calls; calls then follow each other from the opening hour separated by
//! random gaps.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use std::fmt;
use tracing::{debug, info, instrument};

use crate::calls::{CallEvent, Sampler};
use crate::scheduling::BusinessHours;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ClassParameters, RequestClass, SimulationConfig};

/// Sampling state for one request class
#[derive(Clone)]
struct ClassArrivalModel {
    class: RequestClass,
    /// `None` when the mean daily call count is zero
    daily_calls: Option<Poisson<f64>>,
    inter_arrival: Sampler,
    service_duration: Sampler,
}

impl ClassArrivalModel {
    fn new(class: RequestClass, parameters: &ClassParameters) -> SimulationResult<Self> {
        parameters.validate(class)?;

        let daily_calls = if parameters.mean_daily_calls > 0.0 {
            let poisson = Poisson::new(parameters.mean_daily_calls).map_err(|e| {
                SimulationError::distribution_error(format!(
                    "poisson(lambda={}) for {}: {}",
                    parameters.mean_daily_calls, class, e
                ))
            })?;
            Some(poisson)
        } else {
            None
        };

        Ok(Self {
            class,
            daily_calls,
            inter_arrival: Sampler::from_spec(&parameters.inter_arrival)?,
            service_duration: Sampler::from_spec(&parameters.service_duration)?,
        })
    }

    fn draw_call_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match &self.daily_calls {
            Some(poisson) => poisson.sample(rng) as u64,
            None => 0,
        }
    }
}

/// Generator for the call stream of both request classes
#[derive(Clone)]
pub struct ArrivalGenerator {
    business_hours: BusinessHours,
    models: [ClassArrivalModel; 2],
}

impl fmt::Debug for ArrivalGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrivalGenerator")
            .field("business_hours", &self.business_hours)
            .finish()
    }
}

impl ArrivalGenerator {
    /// Create a generator from the simulation configuration
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        Self::from_parameters(config.business_hours, &config.class_a, &config.class_b)
    }

    /// Create a generator from explicit class parameters
    ///
    /// Fails if any distribution parameter is invalid, so a bad configuration
    /// is reported before any call is generated.
    pub fn from_parameters(
        business_hours: BusinessHours,
        class_a: &ClassParameters,
        class_b: &ClassParameters,
    ) -> SimulationResult<Self> {
        business_hours.validate()?;

        Ok(Self {
            business_hours,
            models: [
                ClassArrivalModel::new(RequestClass::ClassA, class_a)?,
                ClassArrivalModel::new(RequestClass::ClassB, class_b)?,
            ],
        })
    }

    /// Generate calls for `days` consecutive days starting at `start_date`
    ///
    /// The result is grouped by day and class, not sorted by call time. Pass
    /// it through [`sort_chronologically`] before allocation.
    #[instrument(skip(self, rng))]
    pub fn generate_calls<R: Rng + ?Sized>(
        &self,
        start_date: NaiveDate,
        days: usize,
        rng: &mut R,
    ) -> Vec<CallEvent> {
        let mut calls = Vec::new();

        for day_index in 0..days {
            let date = start_date + Duration::days(day_index as i64);
            calls.extend(self.generate_calls_for_day(date, rng));
        }

        info!(
            "Generated {} calls over {} days ({} Class A, {} Class B)",
            calls.len(),
            days,
            calls.iter().filter(|c| c.request_class == RequestClass::ClassA).count(),
            calls.iter().filter(|c| c.request_class == RequestClass::ClassB).count()
        );

        calls
    }

    /// Generate the calls of a single day, Class A first then Class B
    pub fn generate_calls_for_day<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Vec<CallEvent> {
        // Both counts are drawn before any call of the day
        let counts: Vec<u64> = self.models.iter().map(|m| m.draw_call_count(rng)).collect();

        let mut calls = Vec::with_capacity(counts.iter().sum::<u64>() as usize);
        for (model, &count) in self.models.iter().zip(&counts) {
            debug!("{}: {} calls on {}", model.class, count, date);
            self.generate_class_calls(model, date, count, rng, &mut calls);
        }
        calls
    }

    fn generate_class_calls<R: Rng + ?Sized>(
        &self,
        model: &ClassArrivalModel,
        date: NaiveDate,
        count: u64,
        rng: &mut R,
        calls: &mut Vec<CallEvent>,
    ) {
        let mut time_of_day = f64::from(self.business_hours.day_start);

        for _ in 0..count {
            let duration = model.service_duration.sample(rng);
            calls.push(CallEvent::new(date, time_of_day, duration, model.class));
            time_of_day += model.inter_arrival.sample(rng);
        }
    }

    /// Business hours whose opening hour anchors each day's first call
    pub fn business_hours(&self) -> BusinessHours {
        self.business_hours
    }
}

/// Stable sort of calls by calendar date, then time of day
pub fn sort_chronologically(calls: &mut [CallEvent]) {
    calls.sort_by(|a, b| a.chronological_cmp(b));
}
