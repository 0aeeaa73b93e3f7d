use std::time::SystemTime;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};

/// The chromosomes of one evolutionary step.
///
/// Membership is fixed once the generation has been ended; until then the
/// evaluation step writes fitness values into the chromosomes in place.
#[derive(Debug, Clone)]
pub struct Generation<C: Chromosome> {
    number: usize,
    created_at: SystemTime,
    chromosomes: Vec<C>,
    best_chromosome: Option<C>,
    ended: bool,
}

impl<C: Chromosome> Generation<C> {
    /// Creates generation `number` from `chromosomes`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if `number` is zero or fewer than two
    /// chromosomes are given.
    pub fn new(number: usize, chromosomes: Vec<C>) -> Result<Self> {
        if number == 0 {
            return Err(GeneticError::Argument(
                "Generation numbers start at 1".to_string(),
            ));
        }
        if chromosomes.len() < 2 {
            return Err(GeneticError::Argument(format!(
                "A generation should have at least 2 chromosomes, got {}",
                chromosomes.len()
            )));
        }

        Ok(Self {
            number,
            created_at: SystemTime::now(),
            chromosomes,
            best_chromosome: None,
            ended: false,
        })
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn chromosomes(&self) -> &[C] {
        &self.chromosomes
    }

    pub(crate) fn chromosomes_mut(&mut self) -> &mut [C] {
        &mut self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The best chromosome, available once the generation has been ended.
    pub fn best_chromosome(&self) -> Option<&C> {
        self.best_chromosome.as_ref()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns true once every chromosome carries a fitness value.
    pub fn is_evaluated(&self) -> bool {
        self.chromosomes.iter().all(|c| c.fitness().is_some())
    }

    /// Sorts the chromosomes by descending fitness. The sort is stable, so
    /// chromosomes with equal fitness keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidState`] if a chromosome has no fitness.
    pub fn sort_by_fitness(&mut self) -> Result<()> {
        if !self.is_evaluated() {
            return Err(GeneticError::InvalidState(format!(
                "Generation {} has chromosomes without fitness",
                self.number
            )));
        }

        self.chromosomes.sort_by(|a, b| {
            let a = a.fitness().unwrap_or(f64::NEG_INFINITY);
            let b = b.fitness().unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
        Ok(())
    }

    /// Closes the generation: sorts it, keeps at most `max_size` chromosomes
    /// and records the best one.
    pub(crate) fn end(&mut self, max_size: usize) -> Result<()> {
        self.sort_by_fitness()?;
        self.chromosomes.truncate(max_size);
        self.best_chromosome = self.chromosomes.first().cloned();
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::test_support::Digits;

    #[test]
    fn test_generation_needs_two_chromosomes() {
        let result = Generation::new(1, vec![Digits::new(vec![1])]);
        assert!(matches!(result, Err(GeneticError::Argument(_))));

        let result = Generation::<Digits>::new(0, vec![Digits::new(vec![1]), Digits::new(vec![2])]);
        assert!(matches!(result, Err(GeneticError::Argument(_))));
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut generation = Generation::new(
            1,
            vec![
                Digits::scored(vec![1], 0.2),
                Digits::scored(vec![2], 0.9),
                Digits::scored(vec![3], 0.2),
                Digits::scored(vec![4], 0.5),
            ],
        )
        .unwrap();

        generation.sort_by_fitness().unwrap();
        let order: Vec<u8> = generation.chromosomes().iter().map(|c| c.genes[0]).collect();

        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_end_requires_fitness() {
        let mut generation =
            Generation::new(1, vec![Digits::scored(vec![1], 0.2), Digits::new(vec![2])]).unwrap();

        assert!(matches!(generation.end(2), Err(GeneticError::InvalidState(_))));
        assert!(!generation.is_ended());
    }

    #[test]
    fn test_end_truncates_and_records_best() {
        let mut generation = Generation::new(
            3,
            vec![
                Digits::scored(vec![1], 0.1),
                Digits::scored(vec![2], 0.7),
                Digits::scored(vec![3], 0.4),
            ],
        )
        .unwrap();

        generation.end(2).unwrap();

        assert!(generation.is_ended());
        assert_eq!(generation.len(), 2);
        assert_eq!(generation.best_chromosome().map(|c| c.genes[0]), Some(2));
        for chromosome in generation.chromosomes() {
            assert!(generation.best_chromosome().unwrap().fitness >= chromosome.fitness);
        }
    }
}
