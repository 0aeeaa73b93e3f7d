use super::{EvolutionSnapshot, TerminationCondition};

/// Reached once the best chromosome's fitness is at least the threshold.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessThresholdTermination {
    expected_fitness: f64,
}

impl FitnessThresholdTermination {
    pub fn new(expected_fitness: f64) -> Self {
        Self { expected_fitness }
    }

    pub fn expected_fitness(&self) -> f64 {
        self.expected_fitness
    }
}

impl Default for FitnessThresholdTermination {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TerminationCondition for FitnessThresholdTermination {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool {
        snapshot
            .best_fitness
            .map_or(false, |fitness| fitness >= self.expected_fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::super::snapshot;
    use super::*;

    #[test]
    fn test_fitness_threshold() {
        let termination = FitnessThresholdTermination::new(0.9);

        assert!(!termination.has_reached(&snapshot(3, None, 0)));
        assert!(!termination.has_reached(&snapshot(3, Some(0.89), 0)));
        assert!(termination.has_reached(&snapshot(3, Some(0.9), 0)));
    }
}
