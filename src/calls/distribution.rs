//! Samplers for call gaps and service durations

use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma, Normal};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::DistributionSpec;

/// A constructed distribution that only yields non-negative values
#[derive(Debug, Clone)]
pub enum Sampler {
    /// Exponential distribution
    Exponential(Exp<f64>),
    /// Normal distribution, clipped at zero
    Normal(Normal<f64>),
    /// Gamma distribution
    Gamma(Gamma<f64>),
}

impl Sampler {
    /// Build a sampler from configured parameters
    pub fn from_spec(spec: &DistributionSpec) -> SimulationResult<Self> {
        match *spec {
            DistributionSpec::Exponential { rate } => {
                Exp::new(rate).map(Sampler::Exponential).map_err(|e| {
                    SimulationError::distribution_error(format!("exponential(rate={}): {}", rate, e))
                })
            }
            DistributionSpec::Normal { mean, std_dev } => {
                Normal::new(mean, std_dev).map(Sampler::Normal).map_err(|e| {
                    SimulationError::distribution_error(format!(
                        "normal(mean={}, std_dev={}): {}",
                        mean, std_dev, e
                    ))
                })
            }
            DistributionSpec::Gamma { shape, scale } => {
                Gamma::new(shape, scale).map(Sampler::Gamma).map_err(|e| {
                    SimulationError::distribution_error(format!(
                        "gamma(shape={}, scale={}): {}",
                        shape, scale, e
                    ))
                })
            }
        }
    }

    /// Draw one value, clamped to be at least zero
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let value = match self {
            Sampler::Exponential(dist) => dist.sample(rng),
            Sampler::Normal(dist) => dist.sample(rng),
            Sampler::Gamma(dist) => dist.sample(rng),
        };
        value.max(0.0)
    }
}
