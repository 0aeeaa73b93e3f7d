use super::{swap_segment, CrossoverStrategy};
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Two cuts, middle segment exchange.
///
/// The genes after the first cut up to and including the second cut are
/// exchanged between the parents. Without fixed cuts both are drawn at random
/// for every crossover.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct TwoPointCrossover {
    swap_points: Option<(usize, usize)>,
}

impl TwoPointCrossover {
    /// Draws random cuts for every crossover.
    pub fn new() -> Self {
        Self { swap_points: None }
    }

    /// Always cuts after `first` and after `second`.
    pub fn at(first: usize, second: usize) -> Result<Self> {
        if first >= second {
            return Err(GeneticError::Argument(format!(
                "The first swap point ({}) must be before the second one ({})",
                first, second
            )));
        }
        Ok(Self {
            swap_points: Some((first, second)),
        })
    }
}

impl<C: Chromosome> CrossoverStrategy<C> for TwoPointCrossover {
    fn parents_number(&self) -> usize {
        2
    }

    fn children_number(&self) -> usize {
        2
    }

    fn min_chromosome_length(&self) -> usize {
        3
    }

    fn perform_cross(&self, parents: &[C], rng: &mut RandomNumberGenerator) -> Result<Vec<C>> {
        let length = parents[0].len();
        let (first, second) = match self.swap_points {
            Some((_, second)) if second + 1 >= length => {
                return Err(GeneticError::Crossover(format!(
                    "The second swap point ({}) must be before the last gene of a chromosome of length {}",
                    second, length
                )))
            }
            Some(points) => points,
            None => {
                let mut points = rng.unique_indexes(2, length - 1)?;
                points.sort_unstable();
                (points[0], points[1])
            }
        };

        swap_segment(&parents[0], &parents[1], first + 1, second + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::test_support::Digits;

    #[test]
    fn test_fixed_cuts() {
        let parents = vec![
            Digits::new(vec![1, 2, 3, 4, 5]),
            Digits::new(vec![6, 7, 8, 9, 0]),
        ];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let children = TwoPointCrossover::at(0, 2)
            .unwrap()
            .cross(&parents, &mut rng)
            .unwrap();

        assert_eq!(children[0].genes, vec![1, 7, 8, 4, 5]);
        assert_eq!(children[1].genes, vec![6, 2, 3, 9, 0]);
    }

    #[test]
    fn test_random_cuts_keep_both_ends() {
        let parents = vec![Digits::new(vec![0; 10]), Digits::new(vec![1; 10])];
        let mut rng = RandomNumberGenerator::from_seed(30);

        for _ in 0..20 {
            let children = TwoPointCrossover::new().cross(&parents, &mut rng).unwrap();
            let genes = &children[0].genes;

            assert_eq!(genes[0], 0);
            assert_eq!(genes[9], 0);
            assert!(genes.contains(&1));
        }
    }

    #[test]
    fn test_too_short_chromosomes() {
        let parents = vec![Digits::new(vec![1, 2]), Digits::new(vec![3, 4])];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = TwoPointCrossover::new().cross(&parents, &mut rng);
        assert!(matches!(result, Err(GeneticError::Crossover(_))));
    }

    #[test]
    fn test_invalid_points() {
        assert!(TwoPointCrossover::at(2, 2).is_err());
    }
}
