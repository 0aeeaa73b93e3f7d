//! # evolvex
//!
//! A genetic algorithm engine. A [`Population`](population::Population) of
//! [`Chromosome`](chromosome::Chromosome)s is evolved generation after
//! generation by a [`GeneticAlgorithm`](evolution::GeneticAlgorithm) applying
//! pluggable selection, crossover, mutation and reinsertion operators until a
//! termination condition is reached. Fitness evaluation is dispatched to a
//! [`TaskExecutor`](executor::TaskExecutor), sequential or backed by a worker
//! pool. A run can be stopped at a generation boundary and resumed later.
pub mod chromosome;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod executor;
pub mod fitness;
pub mod mutation;
pub mod population;
pub mod reinsertion;
pub mod rng;
pub mod selection;
pub mod termination;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use error::{BoxError, GeneticError, Result};
pub use evolution::{EvolutionOptions, EvolutionState, GeneticAlgorithm, LogLevel};
pub use fitness::FitnessFunction;
pub use population::Population;
pub use rng::RandomNumberGenerator;
