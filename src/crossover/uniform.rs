use super::CrossoverStrategy;
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Gene-wise coin flip between two parents.
///
/// For every position, the first child takes the first parent's gene with
/// probability `mix_probability` and the second parent's gene otherwise; the
/// second child takes the opposite gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct UniformCrossover {
    mix_probability: f64,
}

impl UniformCrossover {
    pub fn new(mix_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&mix_probability) {
            return Err(GeneticError::Argument(format!(
                "Mix probability must be within [0, 1], got {}",
                mix_probability
            )));
        }
        Ok(Self { mix_probability })
    }

    pub fn mix_probability(&self) -> f64 {
        self.mix_probability
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self {
            mix_probability: 0.5,
        }
    }
}

impl<C: Chromosome> CrossoverStrategy<C> for UniformCrossover {
    fn parents_number(&self) -> usize {
        2
    }

    fn children_number(&self) -> usize {
        2
    }

    fn perform_cross(&self, parents: &[C], rng: &mut RandomNumberGenerator) -> Result<Vec<C>> {
        let (first, second) = (&parents[0], &parents[1]);
        let mut child1 = first.clone();
        let mut child2 = second.clone();

        for i in 0..first.len() {
            if rng.next_f64() >= self.mix_probability {
                child1.genes_mut()[i] = second.genes()[i].clone();
                child2.genes_mut()[i] = first.genes()[i].clone();
            }
        }

        Ok(vec![child1, child2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::test_support::Digits;

    #[test]
    fn test_children_are_complementary() {
        let parents = vec![
            Digits::scored(vec![0, 0, 0, 0, 0, 0, 0, 0], 1.0),
            Digits::scored(vec![1, 1, 1, 1, 1, 1, 1, 1], 2.0),
        ];
        let mut rng = RandomNumberGenerator::from_seed(4);

        let children = UniformCrossover::default().cross(&parents, &mut rng).unwrap();

        assert_eq!(children.len(), 2);
        for i in 0..8 {
            assert_eq!(children[0].genes[i] + children[1].genes[i], 1);
        }
        assert!(children.iter().all(|c| c.fitness.is_none()));
        // parents untouched
        assert_eq!(parents[0].genes, vec![0; 8]);
        assert_eq!(parents[1].fitness, Some(2.0));
    }

    #[test]
    fn test_mix_probability_one_copies_parents() {
        let parents = vec![Digits::new(vec![1, 2, 3]), Digits::new(vec![4, 5, 6])];
        let mut rng = RandomNumberGenerator::from_seed(4);

        let children = UniformCrossover::new(1.0)
            .unwrap()
            .cross(&parents, &mut rng)
            .unwrap();

        assert_eq!(children[0].genes, vec![1, 2, 3]);
        assert_eq!(children[1].genes, vec![4, 5, 6]);
    }

    #[test]
    fn test_wrong_parent_count() {
        let parents = vec![Digits::new(vec![1, 2, 3])];
        let mut rng = RandomNumberGenerator::from_seed(4);

        let result = UniformCrossover::default().cross(&parents, &mut rng);
        assert!(matches!(result, Err(GeneticError::Argument(_))));
    }

    #[test]
    fn test_mismatched_lengths() {
        let parents = vec![Digits::new(vec![1, 2, 3]), Digits::new(vec![1, 2])];
        let mut rng = RandomNumberGenerator::from_seed(4);

        let result = UniformCrossover::default().cross(&parents, &mut rng);
        assert!(matches!(result, Err(GeneticError::Crossover(_))));
    }

    #[test]
    fn test_invalid_mix_probability() {
        assert!(UniformCrossover::new(1.5).is_err());
    }
}
