use super::ReinsertionStrategy;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Keeps every offspring and tops up with the best parents.
///
/// When there are fewer offspring than the population minimum, the
/// `min_size - offspring.len()` fittest parents survive as well.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistReinsertion;

impl ElitistReinsertion {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> ReinsertionStrategy<C> for ElitistReinsertion {
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
        mut parents: Vec<C>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        let missing = population.min_size().saturating_sub(offspring.len());
        if missing > 0 {
            parents.sort_by(|a, b| {
                let a = a.fitness().unwrap_or(f64::NEG_INFINITY);
                let b = b.fitness().unwrap_or(f64::NEG_INFINITY);
                b.total_cmp(&a)
            });
            offspring.extend(parents.into_iter().take(missing));
        }

        Ok(offspring)
    }
}
