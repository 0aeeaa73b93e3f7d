use super::{EvolutionSnapshot, TerminationCondition};

/// Reached once the given number of generations has been created.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationNumberTermination {
    expected_generations: usize,
}

impl GenerationNumberTermination {
    pub fn new(expected_generations: usize) -> Self {
        Self {
            expected_generations,
        }
    }

    pub fn expected_generations(&self) -> usize {
        self.expected_generations
    }
}

impl Default for GenerationNumberTermination {
    fn default() -> Self {
        Self::new(100)
    }
}

impl TerminationCondition for GenerationNumberTermination {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool {
        snapshot.generations_number >= self.expected_generations
    }
}
