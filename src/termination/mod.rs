//! # TerminationCondition
//!
//! A termination condition is a pure predicate over an [`EvolutionSnapshot`]
//! deciding whether the evolution loop should stop. It is checked after each
//! generation has been evaluated and ended.
pub mod fitness_threshold;
pub mod generation_number;
pub mod logical;
pub mod time_evolving;

use std::fmt::Debug;
use std::time::Duration;

/// Immutable view of the engine state a termination condition decides on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionSnapshot {
    /// Number of generations created so far.
    pub generations_number: usize,
    /// Fitness of the best chromosome of the last ended generation.
    pub best_fitness: Option<f64>,
    /// Cumulative time spent evolving.
    pub time_evolving: Duration,
}

/// # TerminationCondition
///
/// Implementations must not have side effects: asking twice about the same
/// snapshot gives the same answer.
pub trait TerminationCondition: Debug + Send + Sync {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool;
}

pub use fitness_threshold::FitnessThresholdTermination;
pub use generation_number::GenerationNumberTermination;
pub use logical::{AndTermination, OrTermination};
pub use time_evolving::TimeEvolvingTermination;

#[cfg(test)]
pub(crate) fn snapshot(generations_number: usize, best_fitness: Option<f64>, secs: u64) -> EvolutionSnapshot {
    EvolutionSnapshot {
        generations_number,
        best_fitness,
        time_evolving: Duration::from_secs(secs),
    }
}
