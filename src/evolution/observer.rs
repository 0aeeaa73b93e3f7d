//! Notifications emitted by a running [`GeneticAlgorithm`].
//!
//! Observers are called synchronously on the thread running the evolution,
//! after the algorithm's state has been updated. [`ChannelObserver`] forwards
//! the notifications to another thread.

use std::sync::mpsc::{self, Receiver, Sender};

use super::GeneticAlgorithm;
use crate::chromosome::Chromosome;

/// Receives lifecycle notifications from a [`GeneticAlgorithm`].
///
/// Every method has an empty default, so an observer only implements the
/// events it cares about. A handle obtained from
/// [`GeneticAlgorithm::handle`] can be kept by the observer to request a stop.
pub trait EvolutionObserver<C: Chromosome>: Send {
    /// A generation has been evaluated and ended.
    fn on_generation_ran(&self, _algorithm: &GeneticAlgorithm<C>) {}

    /// The termination condition was met and the evolution finished.
    fn on_termination_reached(&self, _algorithm: &GeneticAlgorithm<C>) {}

    /// The evolution stopped, on request or because of a failure.
    fn on_stopped(&self, _algorithm: &GeneticAlgorithm<C>) {}
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionEvent {
    GenerationRan {
        generation: usize,
        best_fitness: Option<f64>,
    },
    TerminationReached {
        generation: usize,
    },
    Stopped {
        generation: usize,
    },
}

/// Observer that sends an [`EvolutionEvent`] per notification over a channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<EvolutionEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<EvolutionEvent>) -> Self {
        Self { sender }
    }

    /// Creates an observer together with the receiving end of its channel.
    pub fn channel() -> (Self, Receiver<EvolutionEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: EvolutionEvent) {
        // nobody listening any more
        let _ = self.sender.send(event);
    }
}

impl<C: Chromosome> EvolutionObserver<C> for ChannelObserver {
    fn on_generation_ran(&self, algorithm: &GeneticAlgorithm<C>) {
        self.send(EvolutionEvent::GenerationRan {
            generation: algorithm.generations_number(),
            best_fitness: algorithm.best_chromosome().and_then(|c| c.fitness()),
        });
    }

    fn on_termination_reached(&self, algorithm: &GeneticAlgorithm<C>) {
        self.send(EvolutionEvent::TerminationReached {
            generation: algorithm.generations_number(),
        });
    }

    fn on_stopped(&self, algorithm: &GeneticAlgorithm<C>) {
        self.send(EvolutionEvent::Stopped {
            generation: algorithm.generations_number(),
        });
    }
}
