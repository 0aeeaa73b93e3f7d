//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Each variant corresponds to one failure class: misuse of the API, a
//! violated operator precondition, a failed fitness computation or an
//! evaluation batch that ran out of time.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evolvex::error::{GeneticError, Result};
//!
//! fn checked_probability(value: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&value) {
//!         return Err(GeneticError::Argument(format!(
//!             "Probability must be within [0, 1], got {}",
//!             value
//!         )));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(checked_probability(0.5).is_ok());
//! assert!(checked_probability(1.5).is_err());
//! ```
//!
//! Wrapping a failure raised by a fitness function:
//!
//! ```rust
//! use evolvex::error::GeneticError;
//! use std::error::Error;
//! use std::io;
//!
//! let cause = io::Error::new(io::ErrorKind::NotFound, "word list missing");
//! let error = GeneticError::fitness_evaluation("scoring failed", cause);
//!
//! assert!(error.source().is_some());
//! ```

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Boxed error produced by user supplied code, such as a fitness function.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Represents errors that can occur in the genetic algorithm engine.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid constructor or call argument.
    #[error("Argument error: {0}")]
    Argument(String),

    /// A random number request with inconsistent bounds, or an index outside
    /// of a chromosome.
    #[error("Range error: {0}")]
    Range(String),

    /// The engine was asked to start, resume or stop in a state that does not
    /// allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A reinsertion cannot produce a generation within the population bounds.
    #[error("Reinsertion error: {0}")]
    Reinsertion(String),

    /// A selection precondition was violated.
    #[error("Selection error: {0}")]
    Selection(String),

    /// A crossover precondition was violated.
    #[error("Crossover error: {0}")]
    Crossover(String),

    /// A mutation precondition was violated.
    #[error("Mutation error: {0}")]
    Mutation(String),

    /// The fitness function failed. The original failure, when there is one,
    /// is available through [`std::error::Error::source`].
    #[error("Fitness evaluation error: {message}")]
    FitnessEvaluation {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The task executor could not run a job, or a job panicked.
    #[error("Executor error: {0}")]
    Executor(String),

    /// A fitness evaluation batch did not complete inside the executor timeout.
    #[error("Executor timeout: fitness evaluation did not complete within {0:?}")]
    ExecutorTimeout(Duration),
}

impl GeneticError {
    /// Builds a [`GeneticError::FitnessEvaluation`] that keeps `source` as its cause.
    pub fn fitness_evaluation<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        GeneticError::FitnessEvaluation {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_fitness_evaluation_keeps_source() {
        let cause = io::Error::new(io::ErrorKind::Other, "boom");
        let error = GeneticError::fitness_evaluation("chromosome scoring failed", cause);

        assert_eq!(
            error.to_string(),
            "Fitness evaluation error: chromosome scoring failed"
        );
        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_timeout_message_mentions_duration() {
        let error = GeneticError::ExecutorTimeout(Duration::from_millis(250));
        assert!(error.to_string().contains("250ms"));
    }
}
