use super::ReinsertionStrategy;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// The offspring replace the parents entirely.
///
/// The strategy neither expands nor collapses, so the offspring count must
/// already lie within the population bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct PureReinsertion;

impl PureReinsertion {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> ReinsertionStrategy<C> for PureReinsertion {
    fn can_collapse(&self) -> bool {
        false
    }

    fn can_expand(&self) -> bool {
        false
    }

    fn perform_select_chromosomes(
        &self,
        _population: &Population<C>,
        offspring: Vec<C>,
        _parents: Vec<C>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        Ok(offspring)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{offspring, population};
    use super::*;
    use crate::error::GeneticError;

    #[test]
    fn test_offspring_only() {
        let population = population(3, 5);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let next = PureReinsertion::new()
            .select_chromosomes(&population, offspring(4), offspring(3), &mut rng)
            .unwrap();

        assert_eq!(next, offspring(4));
    }

    #[test]
    fn test_cannot_expand() {
        let population = population(6, 8);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result =
            PureReinsertion::new().select_chromosomes(&population, offspring(4), offspring(6), &mut rng);
        assert!(matches!(result, Err(GeneticError::Reinsertion(_))));
    }

    #[test]
    fn test_cannot_collapse() {
        let population = population(2, 3);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result =
            PureReinsertion::new().select_chromosomes(&population, offspring(4), offspring(2), &mut rng);
        assert!(matches!(result, Err(GeneticError::Reinsertion(_))));
    }
}
