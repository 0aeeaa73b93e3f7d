use super::MutationStrategy;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Replaces genes with fresh random genes.
///
/// Each mutable gene is replaced independently with the mutation
/// probability. By default every gene is mutable; `with_mutable_genes`
/// restricts mutation to the listed positions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct UniformMutation {
    mutable_genes: Option<Vec<usize>>,
}

impl UniformMutation {
    /// Every gene is mutable.
    pub fn new() -> Self {
        Self {
            mutable_genes: None,
        }
    }

    /// Only the genes at `indexes` are mutable.
    pub fn with_mutable_genes(indexes: Vec<usize>) -> Self {
        Self {
            mutable_genes: Some(indexes),
        }
    }
}

impl<C: Chromosome> MutationStrategy<C> for UniformMutation {
    fn perform_mutate(
        &self,
        chromosome: &mut C,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let indexes: Vec<usize> = match &self.mutable_genes {
            Some(indexes) => indexes.clone(),
            None => (0..chromosome.len()).collect(),
        };

        for index in indexes {
            if rng.next_f64() < probability {
                let gene = chromosome.generate_gene(index, rng);
                chromosome.replace_gene(index, gene)?;
            }
        }

        Ok(())
    }
}
