use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::population::Generation;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{fitness_values, SelectionStrategy};
use crate::selection::{cumulative_probabilities, spin};

/// A selection strategy that selects chromosomes through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection)
/// draws each chromosome independently with probability proportional to its
/// fitness, so the same chromosome may be picked more than once.
///
/// This strategy requires all fitness values to be non-negative and at least
/// one of them to be positive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> SelectionStrategy<C> for RouletteWheelSelection {
    fn perform_selection(
        &self,
        count: usize,
        generation: &Generation<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        let cumulative_probs = cumulative_probabilities(&fitness_values(generation))?;

        Ok((0..count)
            .map(|_| {
                let idx = spin(&cumulative_probs, rng.next_f64());
                generation.chromosomes()[idx].clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::test_support::Digits;
    use crate::error::GeneticError;

    #[test]
    fn test_roulette_wheel_selection() {
        let generation = Generation::new(
            1,
            vec![
                Digits::scored(vec![1], 0.5),
                Digits::scored(vec![2], 0.8),
                Digits::scored(vec![3], 0.3),
            ],
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selected = RouletteWheelSelection::new()
            .select_chromosomes(10, &generation, &mut rng)
            .unwrap();

        assert_eq!(selected.len(), 10);
    }

    #[test]
    fn test_zero_fitness_is_never_picked() {
        let generation = Generation::new(
            1,
            vec![
                Digits::scored(vec![1], 0.0),
                Digits::scored(vec![2], 1.0),
                Digits::scored(vec![3], 0.0),
            ],
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(7);

        let selected = RouletteWheelSelection::new()
            .select_chromosomes(50, &generation, &mut rng)
            .unwrap();

        assert!(selected.iter().all(|c| c.genes[0] == 2));
    }

    #[test]
    fn test_fitter_chromosomes_are_favoured() {
        let generation = Generation::new(
            1,
            vec![Digits::scored(vec![1], 1.0), Digits::scored(vec![2], 9.0)],
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(3);

        let selected = RouletteWheelSelection::new()
            .select_chromosomes(1_000, &generation, &mut rng)
            .unwrap();
        let fit = selected.iter().filter(|c| c.genes[0] == 2).count();

        assert!(fit > 800, "fit = {}", fit);
    }

    #[test]
    fn test_negative_fitness_is_rejected() {
        let generation = Generation::new(
            1,
            vec![Digits::scored(vec![1], -1.0), Digits::scored(vec![2], 1.0)],
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = RouletteWheelSelection::new().select_chromosomes(2, &generation, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));
    }

    #[test]
    fn test_all_zero_fitness_is_rejected() {
        let generation = Generation::new(
            1,
            vec![Digits::scored(vec![1], 0.0), Digits::scored(vec![2], 0.0)],
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = RouletteWheelSelection::new().select_chromosomes(2, &generation, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));
    }
}
