use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{GeneticError, Result};

/// Lifecycle of a [`GeneticAlgorithm`](super::GeneticAlgorithm).
///
/// ```text
/// NotStarted --start--> Started --+--> TerminationReached
///                                 +--> Stopped --resume--> Resumed --+--> TerminationReached
///                                                                    +--> Stopped
/// ```
///
/// A failure while evolving also ends in `Stopped`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvolutionState {
    #[default]
    NotStarted,
    Started,
    Resumed,
    Stopped,
    TerminationReached,
}

impl EvolutionState {
    /// `true` while the evolution loop is executing.
    pub fn is_running(self) -> bool {
        matches!(self, EvolutionState::Started | EvolutionState::Resumed)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Control {
    pub(crate) state: EvolutionState,
    pub(crate) stop_requested: bool,
    pub(crate) generations_number: usize,
}

/// A cloneable, thread-safe view on a running algorithm.
///
/// The evolution loop borrows the algorithm mutably, so other threads and
/// observers use a handle to watch its progress and to request a stop.
#[derive(Debug, Clone, Default)]
pub struct EvolutionHandle {
    control: Arc<Mutex<Control>>,
}

impl EvolutionHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Control> {
        // every critical section is a plain field update, so a poisoned guard is still consistent
        self.control
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Asks the evolution to stop once the generation in progress has ended.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidState`] if the algorithm was never started.
    pub fn stop(&self) -> Result<()> {
        let mut control = self.lock();
        if control.state == EvolutionState::NotStarted {
            return Err(GeneticError::InvalidState(
                "Attempt to stop a genetic algorithm which was not yet started".to_string(),
            ));
        }
        control.stop_requested = true;
        Ok(())
    }

    pub fn state(&self) -> EvolutionState {
        self.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Number of generations created so far.
    pub fn generations_number(&self) -> usize {
        self.lock().generations_number
    }

    /// `true` if a stop was requested and not yet honoured.
    pub fn is_stop_requested(&self) -> bool {
        self.lock().stop_requested
    }
}
