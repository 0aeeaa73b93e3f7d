use super::CrossoverStrategy;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Majority vote among three parents.
///
/// Where the first two parents agree the child inherits their gene, otherwise
/// it takes the third parent's gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ThreeParentCrossover;

impl ThreeParentCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> CrossoverStrategy<C> for ThreeParentCrossover {
    fn parents_number(&self) -> usize {
        3
    }

    fn children_number(&self) -> usize {
        1
    }

    fn perform_cross(&self, parents: &[C], _rng: &mut RandomNumberGenerator) -> Result<Vec<C>> {
        let (first, second, third) = (&parents[0], &parents[1], &parents[2]);
        let mut child = first.clone();

        for (i, gene) in child.genes_mut().iter_mut().enumerate() {
            if first.genes()[i] != second.genes()[i] {
                *gene = third.genes()[i].clone();
            }
        }

        Ok(vec![child])
    }
}
