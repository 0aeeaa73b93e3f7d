//! # Fitness
//!
//! A fitness function scores a chromosome; higher is better. The engine calls
//! it concurrently from executor workers, so implementations must not mutate
//! shared state. Problem data (word lists, targets, lookup tables) belongs in
//! the implementing type or the closure's captured environment.
//!
//! Closures of the shape `Fn(&C) -> Result<f64, BoxError>` implement the
//! trait directly:
//!
//! ```rust
//! use evolvex::error::BoxError;
//! use evolvex::fitness::FitnessFunction;
//!
//! let target = 10.0;
//! let fitness = move |value: &f64| -> Result<f64, BoxError> { Ok(-(value - target).abs()) };
//!
//! assert_eq!(fitness.evaluate(&7.0).unwrap(), -3.0);
//! ```

use crate::error::BoxError;

/// Scores a chromosome.
pub trait FitnessFunction<C>: Send + Sync {
    /// Computes the fitness of `chromosome`. Errors are wrapped by the engine
    /// into [`GeneticError::FitnessEvaluation`](crate::error::GeneticError::FitnessEvaluation)
    /// and abort the run.
    fn evaluate(&self, chromosome: &C) -> Result<f64, BoxError>;
}

impl<C, F> FitnessFunction<C> for F
where
    F: Fn(&C) -> Result<f64, BoxError> + Send + Sync,
{
    fn evaluate(&self, chromosome: &C) -> Result<f64, BoxError> {
        self(chromosome)
    }
}
