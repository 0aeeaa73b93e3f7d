use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Generation;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{fitness_values, SelectionStrategy};

/// A selection strategy that selects chromosomes through tournament selection.
///
/// Each pick draws `size` distinct contestants at random and keeps the
/// fittest of them. Smaller tournaments favour exploration, larger ones
/// favour exploitation.
///
/// When `allow_winner_compete_next_tournament` is false a winner is removed
/// from the pool of contestants, so every selected chromosome is distinct.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
    allow_winner_compete_next_tournament: bool,
}

impl TournamentSelection {
    /// Creates a tournament selection with `size` contestants per tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0.
    pub fn new(size: usize, allow_winner_compete_next_tournament: bool) -> Result<Self> {
        if size < 1 {
            return Err(GeneticError::Argument(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            size,
            allow_winner_compete_next_tournament,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn allow_winner_compete_next_tournament(&self) -> bool {
        self.allow_winner_compete_next_tournament
    }

    /// Runs a single tournament among `candidates` and returns the position
    /// of the winner inside `candidates`.
    fn run_tournament(
        &self,
        fitness: &[f64],
        candidates: &[usize],
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let contestants = rng.unique_indexes(self.size, candidates.len())?;

        let mut best = contestants[0];
        for &position in &contestants[1..] {
            if fitness[candidates[position]] > fitness[candidates[best]] {
                best = position;
            }
        }

        Ok(best)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            size: 2,
            allow_winner_compete_next_tournament: true,
        }
    }
}

impl<C: Chromosome> SelectionStrategy<C> for TournamentSelection {
    fn perform_selection(
        &self,
        count: usize,
        generation: &Generation<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if self.size > generation.len() {
            return Err(GeneticError::Selection(format!(
                "The tournament size ({}) is greater than the available chromosomes ({})",
                self.size,
                generation.len()
            )));
        }
        if !self.allow_winner_compete_next_tournament && generation.len() + 1 < count + self.size {
            return Err(GeneticError::Selection(format!(
                "Without winner re-entry, picking {} chromosomes with tournaments of {} needs at least {} chromosomes, got {}",
                count,
                self.size,
                count + self.size - 1,
                generation.len()
            )));
        }

        let fitness = fitness_values(generation);
        let mut candidates: Vec<usize> = (0..generation.len()).collect();
        let mut selected = Vec::with_capacity(count);

        while selected.len() < count {
            let winner = self.run_tournament(&fitness, &candidates, rng)?;
            selected.push(generation.chromosomes()[candidates[winner]].clone());

            if !self.allow_winner_compete_next_tournament {
                candidates.remove(winner);
            }
        }

        Ok(selected)
    }
}
