use super::{EvolutionSnapshot, TerminationCondition};

/// Reached when either condition is reached.
#[derive(Debug)]
pub struct OrTermination {
    left: Box<dyn TerminationCondition>,
    right: Box<dyn TerminationCondition>,
}

impl OrTermination {
    pub fn new(
        left: impl TerminationCondition + 'static,
        right: impl TerminationCondition + 'static,
    ) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl TerminationCondition for OrTermination {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool {
        self.left.has_reached(snapshot) || self.right.has_reached(snapshot)
    }
}

/// Reached when both conditions are reached.
#[derive(Debug)]
pub struct AndTermination {
    left: Box<dyn TerminationCondition>,
    right: Box<dyn TerminationCondition>,
}

impl AndTermination {
    pub fn new(
        left: impl TerminationCondition + 'static,
        right: impl TerminationCondition + 'static,
    ) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl TerminationCondition for AndTermination {
    fn has_reached(&self, snapshot: &EvolutionSnapshot) -> bool {
        self.left.has_reached(snapshot) && self.right.has_reached(snapshot)
    }
}
