//! # Evolution
//!
//! The orchestrator and everything that configures or observes it:
//!
//! - [`GeneticAlgorithm`] runs the generation loop and owns its lifecycle.
//! - [`GeneticAlgorithmBuilder`] assembles one from its operators.
//! - [`EvolutionOptions`] holds the probabilities, seed and log level.
//! - [`EvolutionHandle`] stops or watches a run from another thread.
//! - [`EvolutionObserver`] receives the lifecycle notifications.
pub mod algorithm;
pub mod builder;
pub mod observer;
pub mod options;
pub mod state;

pub use algorithm::GeneticAlgorithm;
pub use builder::GeneticAlgorithmBuilder;
pub use observer::{ChannelObserver, EvolutionEvent, EvolutionObserver};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use state::{EvolutionHandle, EvolutionState};
