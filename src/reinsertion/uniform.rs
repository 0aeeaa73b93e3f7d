use super::ReinsertionStrategy;
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Pads the offspring with copies of randomly chosen offspring until the
/// population minimum is reached.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct UniformReinsertion;

impl UniformReinsertion {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> ReinsertionStrategy<C> for UniformReinsertion {
    fn can_collapse(&self) -> bool {
        false
    }

    fn can_expand(&self) -> bool {
        true
    }

    fn perform_select_chromosomes(
        &self,
        population: &Population<C>,
        mut offspring: Vec<C>,
        _parents: Vec<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if offspring.is_empty() {
            return Err(GeneticError::Reinsertion(
                "Uniform reinsertion needs at least one offspring to copy".to_string(),
            ));
        }

        while offspring.len() < population.min_size() {
            let idx = rng.index_below(offspring.len())?;
            offspring.push(offspring[idx].clone());
        }

        Ok(offspring)
    }
}
