use super::MutationStrategy;
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Reverses a random contiguous run of genes.
///
/// With the mutation probability, two distinct positions are drawn and the
/// genes between them (both included) are reversed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ReverseSequenceMutation;

impl ReverseSequenceMutation {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> MutationStrategy<C> for ReverseSequenceMutation {
    fn perform_mutate(
        &self,
        chromosome: &mut C,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        if chromosome.len() < 3 {
            return Err(GeneticError::Mutation(format!(
                "A chromosome should have at least 3 genes to reverse a sequence, got {}",
                chromosome.len()
            )));
        }

        if rng.next_f64() < probability {
            let mut points = rng.unique_indexes(2, chromosome.len())?;
            points.sort_unstable();
            chromosome.genes_mut()[points[0]..=points[1]].reverse();
            chromosome.set_fitness(None);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::test_support::Digits;

    #[test]
    fn test_reverses_a_segment() {
        let mut chromosome = Digits::scored(vec![0, 1, 2, 3, 4, 5, 6, 7], 1.0);
        let mut rng = RandomNumberGenerator::from_seed(17);

        ReverseSequenceMutation::new()
            .mutate(&mut chromosome, 1.0, &mut rng)
            .unwrap();

        let genes = &chromosome.genes;
        let start = genes.iter().enumerate().position(|(i, &g)| g as usize != i).unwrap();
        let end = genes.iter().enumerate().rposition(|(i, &g)| g as usize != i).unwrap();
        let mut segment = genes[start..=end].to_vec();
        segment.reverse();

        assert_eq!(segment, (start as u8..=end as u8).collect::<Vec<_>>());
        assert_eq!(chromosome.fitness, None);
    }

    #[test]
    fn test_genes_are_preserved() {
        let mut chromosome = Digits::new(vec![5, 3, 9, 1, 7]);
        let mut rng = RandomNumberGenerator::from_seed(5);

        for _ in 0..10 {
            ReverseSequenceMutation::new()
                .mutate(&mut chromosome, 1.0, &mut rng)
                .unwrap();
        }

        let mut genes = chromosome.genes.clone();
        genes.sort_unstable();
        assert_eq!(genes, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_short_chromosome() {
        let mut chromosome = Digits::new(vec![1, 2]);
        let mut rng = RandomNumberGenerator::from_seed(5);

        let result = ReverseSequenceMutation::new().mutate(&mut chromosome, 1.0, &mut rng);
        assert!(matches!(result, Err(GeneticError::Mutation(_))));
    }
}
