use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Generation;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{fitness_values, SelectionStrategy};

/// A selection strategy that picks the best chromosomes by fitness.
///
/// Selection is deterministic: the chromosomes are ranked by descending
/// fitness (ties keep generation order) and the first `count` are returned.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct EliteSelection;

impl EliteSelection {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> SelectionStrategy<C> for EliteSelection {
    fn perform_selection(
        &self,
        count: usize,
        generation: &Generation<C>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if count > generation.len() {
            return Err(GeneticError::Selection(format!(
                "Elite selection cannot pick {} chromosomes from a generation of {}",
                count,
                generation.len()
            )));
        }

        let fitness = fitness_values(generation);
        let mut ranked: Vec<usize> = (0..fitness.len()).collect();
        ranked.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));

        Ok(ranked
            .into_iter()
            .take(count)
            .map(|idx| generation.chromosomes()[idx].clone())
            .collect())
    }
}
