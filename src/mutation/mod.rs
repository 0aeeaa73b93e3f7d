//! # MutationStrategy
//!
//! Mutations perturb offspring genes in place. They never change the length
//! of a chromosome, and a mutated chromosome loses its fitness.
pub mod reverse_sequence;
pub mod uniform;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// # MutationStrategy
///
/// Implementors provide [`perform_mutate`](MutationStrategy::perform_mutate);
/// the engine calls [`mutate`](MutationStrategy::mutate), which validates the
/// probability first.
pub trait MutationStrategy<C: Chromosome>: Debug + Send + Sync {
    /// Mutates `chromosome` in place; every mutable unit is perturbed
    /// independently with the given `probability`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if `probability` is outside `[0, 1]`.
    fn mutate(
        &self,
        chromosome: &mut C,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GeneticError::Argument(format!(
                "Mutation probability must be within [0, 1], got {}",
                probability
            )));
        }
        self.perform_mutate(chromosome, probability, rng)
    }

    fn perform_mutate(
        &self,
        chromosome: &mut C,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;
}

pub use reverse_sequence::ReverseSequenceMutation;
pub use uniform::UniformMutation;
