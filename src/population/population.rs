use std::fmt;

use tracing::debug;

use super::generation::Generation;
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Builds the chromosomes of the initial generation.
pub type ChromosomeFactory<C> = Box<dyn Fn(&mut RandomNumberGenerator) -> C + Send + Sync>;

/// Decides which ended generations the population keeps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationRetention {
    /// Every generation is kept for inspection after the run.
    #[default]
    KeepAll,
    /// Only the most recent `n` generations are kept.
    KeepLast(usize),
}

/// The ordered history of generations plus the size bounds every generation
/// must respect.
///
/// # Examples
///
/// ```
/// use evolvex::population::Population;
/// # use evolvex::chromosome::Chromosome;
/// # use evolvex::rng::RandomNumberGenerator;
/// # #[derive(Clone, Debug)]
/// # struct Bits { genes: Vec<bool>, fitness: Option<f64> }
/// # impl Chromosome for Bits {
/// #     type Gene = bool;
/// #     fn genes(&self) -> &[bool] { &self.genes }
/// #     fn genes_mut(&mut self) -> &mut [bool] { &mut self.genes }
/// #     fn generate_gene(&self, _: usize, rng: &mut RandomNumberGenerator) -> bool { rng.next_f64() < 0.5 }
/// #     fn fitness(&self) -> Option<f64> { self.fitness }
/// #     fn set_fitness(&mut self, fitness: Option<f64>) { self.fitness = fitness; }
/// # }
///
/// let mut population = Population::new(4, 8, |rng: &mut RandomNumberGenerator| Bits {
///     genes: (0..6).map(|_| rng.next_f64() < 0.5).collect(),
///     fitness: None,
/// })
/// .unwrap();
///
/// population
///     .create_initial_generation(&mut RandomNumberGenerator::from_seed(1))
///     .unwrap();
///
/// assert_eq!(population.generations_number(), 1);
/// assert_eq!(population.current_generation().unwrap().len(), 4);
/// ```
pub struct Population<C: Chromosome> {
    min_size: usize,
    max_size: usize,
    factory: ChromosomeFactory<C>,
    retention: GenerationRetention,
    generations: Vec<Generation<C>>,
    generations_number: usize,
    best_chromosome: Option<C>,
}

impl<C: Chromosome> Population<C> {
    /// Creates an empty population.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if `min_size < 2` or `max_size < min_size`.
    pub fn new<F>(min_size: usize, max_size: usize, factory: F) -> Result<Self>
    where
        F: Fn(&mut RandomNumberGenerator) -> C + Send + Sync + 'static,
    {
        if min_size < 2 {
            return Err(GeneticError::Argument(format!(
                "The minimum size of a population is 2 chromosomes, got {}",
                min_size
            )));
        }
        if max_size < min_size {
            return Err(GeneticError::Argument(format!(
                "The maximum size ({}) must be greater or equal to the minimum size ({})",
                max_size, min_size
            )));
        }

        Ok(Self {
            min_size,
            max_size,
            factory: Box::new(factory),
            retention: GenerationRetention::default(),
            generations: Vec::new(),
            generations_number: 0,
            best_chromosome: None,
        })
    }

    /// Sets the retention policy applied whenever a generation is created.
    pub fn with_retention(mut self, retention: GenerationRetention) -> Result<Self> {
        if retention == GenerationRetention::KeepLast(0) {
            return Err(GeneticError::Argument(
                "At least the current generation must be retained".to_string(),
            ));
        }
        self.retention = retention;
        Ok(self)
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn retention(&self) -> GenerationRetention {
        self.retention
    }

    /// Number of generations created since the initial one, including it.
    /// Generations dropped by the retention policy still count.
    pub fn generations_number(&self) -> usize {
        self.generations_number
    }

    /// The retained generations, oldest first.
    pub fn generations(&self) -> &[Generation<C>] {
        &self.generations
    }

    pub fn current_generation(&self) -> Option<&Generation<C>> {
        self.generations.last()
    }

    pub(crate) fn current_generation_mut(&mut self) -> Option<&mut Generation<C>> {
        self.generations.last_mut()
    }

    /// The best chromosome of the last ended generation.
    pub fn best_chromosome(&self) -> Option<&C> {
        self.best_chromosome.as_ref()
    }

    /// Discards any history and creates generation 1 with `min_size`
    /// chromosomes built by the factory.
    pub fn create_initial_generation(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        self.generations.clear();
        self.generations_number = 0;
        self.best_chromosome = None;

        let chromosomes: Vec<C> = (0..self.min_size).map(|_| (self.factory)(rng)).collect();

        let length = chromosomes[0].len();
        if let Some(odd) = chromosomes.iter().find(|c| c.len() != length) {
            return Err(GeneticError::Argument(format!(
                "The chromosome factory must build chromosomes of constant length: got {} and {}",
                length,
                odd.len()
            )));
        }

        self.create_new_generation(chromosomes)
    }

    /// Appends a new current generation.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if fewer than `min_size` chromosomes are given.
    pub fn create_new_generation(&mut self, chromosomes: Vec<C>) -> Result<()> {
        if chromosomes.len() < self.min_size {
            return Err(GeneticError::Argument(format!(
                "A new generation needs at least {} chromosomes, got {}",
                self.min_size,
                chromosomes.len()
            )));
        }

        let generation = Generation::new(self.generations_number + 1, chromosomes)?;
        self.generations.push(generation);
        self.generations_number += 1;

        if let GenerationRetention::KeepLast(keep) = self.retention {
            if self.generations.len() > keep {
                let excess = self.generations.len() - keep;
                self.generations.drain(..excess);
            }
        }

        Ok(())
    }

    /// Ends the current generation: sorts it by fitness, trims it to
    /// `max_size` and updates the best chromosome.
    pub fn end_current_generation(&mut self) -> Result<()> {
        let max_size = self.max_size;
        let generation = self.current_generation_mut().ok_or_else(|| {
            GeneticError::InvalidState("The population has no generation to end".to_string())
        })?;
        generation.end(max_size)?;

        let best = generation.best_chromosome().cloned();
        let previous = self.best_chromosome.as_ref().and_then(|c| c.fitness());
        let current = best.as_ref().and_then(|c| c.fitness());
        if previous != current {
            debug!(
                generation = self.generations_number,
                previous = ?previous,
                current = ?current,
                "Best chromosome changed"
            );
        }
        self.best_chromosome = best;
        Ok(())
    }
}

impl<C: Chromosome> fmt::Debug for Population<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Population")
            .field("min_size", &self.min_size)
            .field("max_size", &self.max_size)
            .field("retention", &self.retention)
            .field("generations_number", &self.generations_number)
            .finish_non_exhaustive()
    }
}
