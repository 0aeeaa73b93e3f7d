//! # Population
//!
//! The population owns the history of generations created during a run and
//! enforces the configured size bounds. Only the evolution loop mutates it.
pub mod generation;
pub mod population;

pub use generation::Generation;
pub use population::{ChromosomeFactory, GenerationRetention, Population};
