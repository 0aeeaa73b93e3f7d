use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::population::Generation;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{fitness_values, SelectionStrategy};
use crate::selection::{cumulative_probabilities, spin};

/// Fitness proportionate selection with a single spin.
///
/// Like [`RouletteWheelSelection`](super::RouletteWheelSelection), but all
/// `count` pointers are evenly spaced from one random start, which keeps the
/// number of copies of each chromosome close to its expected value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct StochasticUniversalSamplingSelection;

impl StochasticUniversalSamplingSelection {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Chromosome> SelectionStrategy<C> for StochasticUniversalSamplingSelection {
    fn perform_selection(
        &self,
        count: usize,
        generation: &Generation<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        let cumulative_probs = cumulative_probabilities(&fitness_values(generation))?;
        let step = 1.0 / count as f64;
        let mut pointer = rng.next_f64();

        Ok((0..count)
            .map(|_| {
                let idx = spin(&cumulative_probs, pointer);
                pointer += step;
                if pointer > 1.0 {
                    pointer -= 1.0;
                }
                generation.chromosomes()[idx].clone()
            })
            .collect())
    }
}
