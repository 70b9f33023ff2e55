//! Simulation Configuration
//!
//! Engine-facing parameters consumed from the caller: how many blocks to
//! simulate, the address-space bound, and the latency coefficients.
//! Validation runs before any table is generated or mutated.

use crate::deallocator::ConfigError;
use crate::latency::LatencyModel;

/// Minimum number of jobs in a table
pub const MIN_JOBS: usize = 2;

/// Parameters of one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of initial blocks
    pub num_jobs: usize,
    /// Upper bound for synthesized addresses, inclusive
    pub max_memory: u64,
    /// Latency slope coefficient
    pub alpha: f64,
    /// Latency base cost
    pub beta: f64,
}

impl SimulationConfig {
    /// Check the configuration without touching any table
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_jobs < MIN_JOBS {
            return Err(ConfigError::TooFewJobs {
                num_jobs: self.num_jobs,
                min: MIN_JOBS,
            });
        }
        if self.alpha < 0.0 {
            return Err(ConfigError::NegativeCoefficient {
                name: "alpha",
                value: self.alpha,
            });
        }
        if self.beta < 0.0 {
            return Err(ConfigError::NegativeCoefficient {
                name: "beta",
                value: self.beta,
            });
        }
        if self.max_memory < self.num_jobs as u64 {
            return Err(ConfigError::AddressSpaceTooSmall {
                max_memory: self.max_memory,
                num_jobs: self.num_jobs,
            });
        }
        Ok(())
    }

    /// Latency model built from this configuration's coefficients
    pub fn latency_model(&self) -> Result<LatencyModel, ConfigError> {
        LatencyModel::new(self.alpha, self.beta)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_jobs: 30,
            max_memory: 15_000,
            alpha: LatencyModel::DEFAULT_ALPHA,
            beta: LatencyModel::DEFAULT_BETA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_too_few_jobs() {
        let config = SimulationConfig {
            num_jobs: 1,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooFewJobs { num_jobs: 1, min: MIN_JOBS })
        );
    }

    #[test]
    fn test_negative_alpha() {
        let config = SimulationConfig {
            alpha: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeCoefficient { name: "alpha", .. })
        ));
    }

    #[test]
    fn test_address_space_too_small() {
        let config = SimulationConfig {
            num_jobs: 100,
            max_memory: 50,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AddressSpaceTooSmall {
                max_memory: 50,
                num_jobs: 100,
            })
        );
    }

    #[test]
    fn test_latency_model_from_config() {
        let model = SimulationConfig::default().latency_model().unwrap();
        assert_eq!(model.alpha(), LatencyModel::DEFAULT_ALPHA);
        assert_eq!(model.beta(), LatencyModel::DEFAULT_BETA);
    }
}
