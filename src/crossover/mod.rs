//! # CrossoverStrategy
//!
//! The `CrossoverStrategy` trait defines how a fixed number of parents is
//! recombined into a fixed number of offspring. Crossovers never modify their
//! parents; offspring start without fitness.
pub mod one_point;
pub mod three_parent;
pub mod two_point;
pub mod uniform;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// # CrossoverStrategy
///
/// Implementors provide [`perform_cross`](CrossoverStrategy::perform_cross);
/// the engine calls [`cross`](CrossoverStrategy::cross), which validates the
/// parents first.
pub trait CrossoverStrategy<C: Chromosome>: Debug + Send + Sync {
    /// Number of parents consumed by one crossover. Always at least 2.
    fn parents_number(&self) -> usize;

    /// Number of offspring produced by one crossover. Always at least 1.
    fn children_number(&self) -> usize;

    /// Shortest chromosome this crossover can cut.
    fn min_chromosome_length(&self) -> usize {
        1
    }

    /// Recombines `parents` into `children_number()` offspring.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if the number of parents differs from
    /// `parents_number()`, and [`GeneticError::Crossover`] if the parents have
    /// different lengths or are shorter than `min_chromosome_length()`.
    fn cross(&self, parents: &[C], rng: &mut RandomNumberGenerator) -> Result<Vec<C>> {
        if parents.len() != self.parents_number() {
            return Err(GeneticError::Argument(format!(
                "The number of parents should be the same of parents number: expected {}, got {}",
                self.parents_number(),
                parents.len()
            )));
        }

        let length = parents[0].len();
        if parents.iter().any(|p| p.len() != length) {
            return Err(GeneticError::Crossover(
                "All parents must have the same number of genes".to_string(),
            ));
        }
        if length < self.min_chromosome_length() {
            return Err(GeneticError::Crossover(format!(
                "A chromosome should have at least {} genes for {:?}, got {}",
                self.min_chromosome_length(),
                self,
                length
            )));
        }

        let mut children = self.perform_cross(parents, rng)?;
        for child in &mut children {
            child.set_fitness(None);
        }
        Ok(children)
    }

    /// Recombines validated parents.
    fn perform_cross(&self, parents: &[C], rng: &mut RandomNumberGenerator) -> Result<Vec<C>>;
}

/// Builds the two children of a segment exchange: each child keeps its own
/// parent's genes outside `start..end` and takes the other parent's inside.
pub(crate) fn swap_segment<C: Chromosome>(
    first: &C,
    second: &C,
    start: usize,
    end: usize,
) -> Result<Vec<C>> {
    let mut child1 = first.clone();
    let mut child2 = second.clone();
    child1.replace_genes(start, &second.genes()[start..end])?;
    child2.replace_genes(start, &first.genes()[start..end])?;
    Ok(vec![child1, child2])
}

pub use one_point::OnePointCrossover;
pub use three_parent::ThreeParentCrossover;
pub use two_point::TwoPointCrossover;
pub use uniform::UniformCrossover;
