//! SA configuration and cooling schedules.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::moves::IntraConfig;

/// Cooling schedule for temperature reduction, applied once per outer step.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.75 }
    }
}

impl CoolingSchedule {
    /// Next temperature after `temperature`.
    pub fn cool(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

/// Configuration for the simulated annealing controller.
///
/// # Examples
///
/// ```
/// use u_oproute::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature_ratio(0.3)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_iterations_per_temperature(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature as a fraction of the initial makespan.
    pub initial_temperature_ratio: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Candidates evaluated at each temperature level.
    pub iterations_per_temperature: usize,

    /// Intra-route descent applied inside each move.
    pub intra: IntraConfig,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature_ratio: 0.2,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 5,
            intra: IntraConfig::default(),
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature_ratio(mut self, ratio: f64) -> Self {
        self.initial_temperature_ratio = ratio;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_intra(mut self, intra: IntraConfig) -> Self {
        self.intra = intra;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature_ratio.is_nan() || self.initial_temperature_ratio < 0.0 {
            return Err("initial_temperature_ratio must be non-negative".into());
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be at least 1".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature_ratio - 0.2).abs() < 1e-12);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.75 });
        assert_eq!(config.iterations_per_temperature, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_geometric_cooling() {
        let cooling = CoolingSchedule::default();
        assert!((cooling.cool(100.0) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_lundy_mees_cooling() {
        let cooling = CoolingSchedule::LundyMees { beta: 0.01 };
        assert!((cooling.cool(100.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_bad_ratio() {
        let config = SaConfig::default().with_initial_temperature_ratio(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature_ratio(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }
}
