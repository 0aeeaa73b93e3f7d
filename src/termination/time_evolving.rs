use std::time::Duration;

use super::{EvolutionSnapshot, TerminationCondition};

/// Reached once the engine has spent the given time evolving.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEvolvingTermination {
    max_time: Duration,
}

impl TimeEvolvingTermination {
    pub fn new(max_time: Duration) -> Self {
        Self { max_time }
    }

    pub fn max_time(&self) -> Duration {
        self.max_time
    }
}

impl TerminationCondition for TimeEvolvingTermination {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool {
        snapshot.time_evolving >= self.max_time
    }
}
