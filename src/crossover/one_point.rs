use super::{swap_segment, CrossoverStrategy};
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Single cut, tail exchange.
///
/// Genes after `swap_index` are exchanged between the two parents. Without a
/// fixed index the cut is drawn at random for every crossover.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct OnePointCrossover {
    swap_index: Option<usize>,
}

impl OnePointCrossover {
    /// Draws a random cut for every crossover.
    pub fn new() -> Self {
        Self { swap_index: None }
    }

    /// Always cuts after `swap_index`.
    pub fn at(swap_index: usize) -> Self {
        Self {
            swap_index: Some(swap_index),
        }
    }
}

impl<C: Chromosome> CrossoverStrategy<C> for OnePointCrossover {
    fn parents_number(&self) -> usize {
        2
    }

    fn children_number(&self) -> usize {
        2
    }

    fn min_chromosome_length(&self) -> usize {
        2
    }

    fn perform_cross(&self, parents: &[C], rng: &mut RandomNumberGenerator) -> Result<Vec<C>> {
        let length = parents[0].len();
        let swap_index = match self.swap_index {
            Some(idx) if idx + 1 >= length => {
                return Err(GeneticError::Crossover(format!(
                    "The swap index ({}) must leave at least one gene to exchange in a chromosome of length {}",
                    idx, length
                )))
            }
            Some(idx) => idx,
            None => rng.index_below(length - 1)?,
        };

        swap_segment(&parents[0], &parents[1], swap_index + 1, length)
    }
}
