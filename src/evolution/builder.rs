use std::sync::Arc;
use std::time::Duration;

use super::algorithm::{check_crossover, GeneticAlgorithm};
use super::observer::EvolutionObserver;
use super::options::EvolutionOptions;
use super::state::EvolutionHandle;
use crate::chromosome::Chromosome;
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, Result};
use crate::executor::{SequentialTaskExecutor, TaskExecutor};
use crate::fitness::FitnessFunction;
use crate::mutation::MutationStrategy;
use crate::population::Population;
use crate::reinsertion::{ElitistReinsertion, ReinsertionStrategy};
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;
use crate::termination::{GenerationNumberTermination, TerminationCondition};

/// Assembles a [`GeneticAlgorithm`].
///
/// Population, fitness, selection, crossover and mutation are required. When
/// not given, the reinsertion is [`ElitistReinsertion`], the termination is a
/// single generation and fitness is evaluated by a
/// [`SequentialTaskExecutor`].
pub struct GeneticAlgorithmBuilder<C: Chromosome> {
    population: Option<Population<C>>,
    fitness: Option<Arc<dyn FitnessFunction<C>>>,
    selection: Option<Box<dyn SelectionStrategy<C>>>,
    crossover: Option<Box<dyn CrossoverStrategy<C>>>,
    mutation: Option<Box<dyn MutationStrategy<C>>>,
    reinsertion: Option<Box<dyn ReinsertionStrategy<C>>>,
    termination: Option<Box<dyn TerminationCondition>>,
    task_executor: Option<Box<dyn TaskExecutor>>,
    options: Option<EvolutionOptions>,
    observers: Vec<Box<dyn EvolutionObserver<C>>>,
}

impl<C: Chromosome> GeneticAlgorithmBuilder<C> {
    pub fn new() -> Self {
        Self {
            population: None,
            fitness: None,
            selection: None,
            crossover: None,
            mutation: None,
            reinsertion: None,
            termination: None,
            task_executor: None,
            options: None,
            observers: Vec::new(),
        }
    }

    pub fn with_population(mut self, population: Population<C>) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: FitnessFunction<C> + 'static,
    {
        self.fitness = Some(Arc::new(fitness));
        self
    }

    pub fn with_selection<S>(mut self, selection: S) -> Self
    where
        S: SelectionStrategy<C> + 'static,
    {
        self.selection = Some(Box::new(selection));
        self
    }

    pub fn with_crossover<X>(mut self, crossover: X) -> Self
    where
        X: CrossoverStrategy<C> + 'static,
    {
        self.crossover = Some(Box::new(crossover));
        self
    }

    pub fn with_mutation<M>(mut self, mutation: M) -> Self
    where
        M: MutationStrategy<C> + 'static,
    {
        self.mutation = Some(Box::new(mutation));
        self
    }

    pub fn with_reinsertion<R>(mut self, reinsertion: R) -> Self
    where
        R: ReinsertionStrategy<C> + 'static,
    {
        self.reinsertion = Some(Box::new(reinsertion));
        self
    }

    pub fn with_termination<T>(mut self, termination: T) -> Self
    where
        T: TerminationCondition + 'static,
    {
        self.termination = Some(Box::new(termination));
        self
    }

    pub fn with_task_executor<E>(mut self, task_executor: E) -> Self
    where
        E: TaskExecutor + 'static,
    {
        self.task_executor = Some(Box::new(task_executor));
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: EvolutionObserver<C> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> Result<GeneticAlgorithm<C>> {
        let population = self
            .population
            .ok_or_else(|| GeneticError::Argument("Population not specified".to_string()))?;

        let fitness = self
            .fitness
            .ok_or_else(|| GeneticError::Argument("Fitness function not specified".to_string()))?;

        let selection = self
            .selection
            .ok_or_else(|| GeneticError::Argument("Selection strategy not specified".to_string()))?;

        let crossover = self
            .crossover
            .ok_or_else(|| GeneticError::Argument("Crossover strategy not specified".to_string()))?;
        check_crossover(crossover.as_ref(), &population)?;

        let mutation = self
            .mutation
            .ok_or_else(|| GeneticError::Argument("Mutation strategy not specified".to_string()))?;

        let options = self.options.unwrap_or_default();
        let rng = match options.seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        Ok(GeneticAlgorithm {
            population,
            fitness,
            selection,
            crossover,
            mutation,
            reinsertion: self
                .reinsertion
                .unwrap_or_else(|| Box::new(ElitistReinsertion)),
            termination: self
                .termination
                .unwrap_or_else(|| Box::new(GenerationNumberTermination::new(1))),
            task_executor: self
                .task_executor
                .unwrap_or_else(|| Box::new(SequentialTaskExecutor::new())),
            options,
            rng,
            time_evolving: Duration::ZERO,
            handle: EvolutionHandle::new(),
            observers: self.observers,
        })
    }
}

impl<C: Chromosome> Default for GeneticAlgorithmBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
