//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the tunable knobs of a run that are not
//! operators themselves: the crossover and mutation probabilities, an optional
//! seed for the random number generator and the logging level.
//!
//! ## Example
//!
//! ```rust
//! use evolvex::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Custom probabilities, minimal logging
//! let custom_options = EvolutionOptions::new(0.9, 0.05, LogLevel::Minimal).unwrap();
//! assert_eq!(custom_options.crossover_probability(), 0.9);
//!
//! // Defaults: crossover 0.75, mutation 0.2, no seed, no logging
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.mutation_probability(), 0.2);
//! ```
//!
//! ### `LogLevel`
//!
//! - `Verbose`: every generation is logged, and each chromosome with it at debug level.
//! - `Minimal`: one line per generation.
//! - `None`: the engine only logs lifecycle transitions and failures.

use crate::error::{GeneticError, Result};

/// Probability that a group of parents is recombined.
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.75;

/// Probability handed to the mutation strategy for each offspring.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.2;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedEvolutionOptions")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    crossover_probability: f64,
    mutation_probability: f64,
    seed: Option<u64>,
    log_level: LogLevel,
}

/// Deserialized form of [`EvolutionOptions`], validated on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedEvolutionOptions {
    crossover_probability: f64,
    mutation_probability: f64,
    seed: Option<u64>,
    #[serde(default)]
    log_level: LogLevel,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedEvolutionOptions> for EvolutionOptions {
    type Error = GeneticError;

    fn try_from(unchecked: UncheckedEvolutionOptions) -> Result<Self> {
        let mut options = EvolutionOptions::new(
            unchecked.crossover_probability,
            unchecked.mutation_probability,
            unchecked.log_level,
        )?;
        options.seed = unchecked.seed;
        Ok(options)
    }
}

fn check_probability(name: &str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Argument(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(value)
}

impl EvolutionOptions {
    /// Creates options with the given probabilities and log level, without a seed.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if a probability is outside `[0, 1]`.
    pub fn new(
        crossover_probability: f64,
        mutation_probability: f64,
        log_level: LogLevel,
    ) -> Result<Self> {
        Ok(Self {
            crossover_probability: check_probability("Crossover probability", crossover_probability)?,
            mutation_probability: check_probability("Mutation probability", mutation_probability)?,
            seed: None,
            log_level,
        })
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the crossover probability.
    pub fn set_crossover_probability(&mut self, value: f64) -> Result<()> {
        self.crossover_probability = check_probability("Crossover probability", value)?;
        Ok(())
    }

    /// Sets the mutation probability.
    pub fn set_mutation_probability(&mut self, value: f64) -> Result<()> {
        self.mutation_probability = check_probability("Mutation probability", value)?;
        Ok(())
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evolvex::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .crossover_probability(0.8)
    ///     .mutation_probability(0.1)
    ///     .seed(42)
    ///     .log_level(LogLevel::Minimal)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(options.seed(), Some(42));
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            crossover_probability: DEFAULT_CROSSOVER_PROBABILITY,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            seed: None,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset values fall back to the defaults; probabilities are validated by
/// [`EvolutionOptionsBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    crossover_probability: Option<f64>,
    mutation_probability: Option<f64>,
    seed: Option<u64>,
    log_level: Option<LogLevel>,
}

impl EvolutionOptionsBuilder {
    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    /// Seeds the random number generator of the run, making it reproducible.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> Result<EvolutionOptions> {
        let mut options = EvolutionOptions::new(
            self.crossover_probability
                .unwrap_or(DEFAULT_CROSSOVER_PROBABILITY),
            self.mutation_probability
                .unwrap_or(DEFAULT_MUTATION_PROBABILITY),
            self.log_level.unwrap_or_default(),
        )?;
        options.seed = self.seed;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EvolutionOptions::default();
        assert_eq!(options.crossover_probability(), 0.75);
        assert_eq!(options.mutation_probability(), 0.2);
        assert_eq!(options.seed(), None);
        assert_eq!(options.log_level(), LogLevel::None);
        assert_eq!(EvolutionOptions::builder().build().unwrap(), options);
    }

    #[test]
    fn test_probabilities_are_validated() {
        assert!(EvolutionOptions::new(1.1, 0.2, LogLevel::None).is_err());
        assert!(EvolutionOptions::new(0.5, -0.1, LogLevel::None).is_err());
        assert!(EvolutionOptions::builder()
            .mutation_probability(2.0)
            .build()
            .is_err());

        let mut options = EvolutionOptions::default();
        assert!(matches!(
            options.set_crossover_probability(-1.0),
            Err(GeneticError::Argument(_))
        ));
        assert_eq!(options.crossover_probability(), 0.75);
        options.set_mutation_probability(1.0).unwrap();
        assert_eq!(options.mutation_probability(), 1.0);
    }

    #[test]
    fn test_builder_keeps_seed() {
        let options = EvolutionOptions::builder()
            .seed(7)
            .log_level(LogLevel::Verbose)
            .build()
            .unwrap();

        assert_eq!(options.seed(), Some(7));
        assert_eq!(options.log_level(), LogLevel::Verbose);
    }
}
