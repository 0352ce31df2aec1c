//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{GeoTspError, Result};

/// Configuration for the tour GA.
///
/// # Defaults
///
/// ```
/// use u_geotsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_geotsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_generations(1000)
///     .with_mutation_percent(5.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in every generation. Must be at least 2.
    pub population_size: usize,

    /// Number of evaluate → select → recombine cycles to run.
    pub generations: usize,

    /// Probability of mutating each child (0.0–1.0).
    ///
    /// Out-of-range values are rejected by [`validate`](Self::validate)
    /// rather than clamped.
    pub mutation_chance: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_chance: 0.1,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability (0.0–1.0).
    pub fn with_mutation_chance(mut self, chance: f64) -> Self {
        self.mutation_chance = chance;
        self
    }

    /// Sets the mutation probability from a percentage (0–100).
    pub fn with_mutation_percent(self, percent: f64) -> Self {
        self.with_mutation_chance(percent / 100.0)
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GeoTspError::InvalidPopulationSize {
                size: self.population_size,
                minimum: 2,
            });
        }
        if self.generations == 0 {
            return Err(GeoTspError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(GeoTspError::InvalidProbabilityRange {
                value: self.mutation_chance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 500);
        assert!((config.mutation_chance - 0.1).abs() < 1e-10);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(20)
            .with_mutation_chance(0.25)
            .with_seed(42);

        assert_eq!(config.population_size, 8);
        assert_eq!(config.generations, 20);
        assert!((config.mutation_chance - 0.25).abs() < 1e-10);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_mutation_percent() {
        let config = GaConfig::default().with_mutation_percent(35.0);
        assert!((config.mutation_chance - 0.35).abs() < 1e-10);

        let config = GaConfig::default().with_mutation_percent(100.0);
        assert!((config.mutation_chance - 1.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(
            config.validate(),
            Err(GeoTspError::InvalidPopulationSize { size: 1, minimum: 2 })
        ));
        assert!(GaConfig::default().with_population_size(2).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_generations(0);
        assert!(matches!(config.validate(), Err(GeoTspError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_mutation_range() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = GaConfig::default().with_mutation_chance(bad);
            assert!(matches!(
                config.validate(),
                Err(GeoTspError::InvalidProbabilityRange { .. })
            ));
        }
        assert!(GaConfig::default().with_mutation_percent(150.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_chance(0.0).validate().is_ok());
        assert!(GaConfig::default().with_mutation_chance(1.0).validate().is_ok());
    }
}
