//! # ReinsertionStrategy
//!
//! A reinsertion decides which offspring and parents survive into the next
//! generation. Every strategy declares whether it may grow the offspring up
//! to the population minimum (`can_expand`) and whether it may shrink them
//! down to the population maximum (`can_collapse`); a strategy used outside
//! its declared capability is rejected before it runs.
pub mod elitist;
pub mod pure;
pub mod uniform;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// # ReinsertionStrategy
///
/// Implementors provide
/// [`perform_select_chromosomes`](ReinsertionStrategy::perform_select_chromosomes);
/// the engine calls
/// [`select_chromosomes`](ReinsertionStrategy::select_chromosomes), which
/// enforces the population bounds first.
pub trait ReinsertionStrategy<C: Chromosome>: Debug + Send + Sync {
    /// Whether the strategy may return fewer chromosomes than it receives as
    /// offspring.
    fn can_collapse(&self) -> bool;

    /// Whether the strategy may return more chromosomes than it receives as
    /// offspring.
    fn can_expand(&self) -> bool;

    /// Selects the chromosomes of the next generation.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Reinsertion`] if the strategy cannot expand and
    /// there are fewer offspring than `population.min_size()`, or if it cannot
    /// collapse and there are more offspring than `population.max_size()`.
    fn select_chromosomes(
        &self,
        population: &Population<C>,
        offspring: Vec<C>,
        parents: Vec<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if !self.can_expand() && offspring.len() < population.min_size() {
            return Err(GeneticError::Reinsertion(format!(
                "{:?} cannot expand {} offspring to the population minimum of {}. Try another reinsertion",
                self,
                offspring.len(),
                population.min_size()
            )));
        }

        if !self.can_collapse() && offspring.len() > population.max_size() {
            return Err(GeneticError::Reinsertion(format!(
                "{:?} cannot collapse {} offspring to the population maximum of {}. Try another reinsertion",
                self,
                offspring.len(),
                population.max_size()
            )));
        }

        self.perform_select_chromosomes(population, offspring, parents, rng)
    }

    /// Blends offspring and parents once the bounds have been checked.
    fn perform_select_chromosomes(
        &self,
        population: &Population<C>,
        offspring: Vec<C>,
        parents: Vec<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>>;
}

pub use elitist::ElitistReinsertion;
pub use pure::PureReinsertion;
pub use uniform::UniformReinsertion;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::chromosome::test_support::Digits;
    use crate::population::Population;
    use crate::rng::RandomNumberGenerator;

    pub fn population(min: usize, max: usize) -> Population<Digits> {
        Population::new(min, max, |_: &mut RandomNumberGenerator| Digits::new(vec![0])).unwrap()
    }

    pub fn offspring(count: usize) -> Vec<Digits> {
        (0..count).map(|i| Digits::new(vec![i as u8])).collect()
    }
}
