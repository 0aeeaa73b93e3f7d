use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::builder::GeneticAlgorithmBuilder;
use super::observer::EvolutionObserver;
use super::options::{EvolutionOptions, LogLevel};
use super::state::{EvolutionHandle, EvolutionState};
use crate::chromosome::Chromosome;
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, Result};
use crate::executor::{panic_message, TaskExecutor};
use crate::fitness::FitnessFunction;
use crate::mutation::MutationStrategy;
use crate::population::Population;
use crate::reinsertion::ReinsertionStrategy;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;
use crate::termination::{EvolutionSnapshot, TerminationCondition};

#[derive(Debug, Clone, Copy)]
enum Notification {
    GenerationRan,
    TerminationReached,
    Stopped,
}

enum Boundary {
    Continue,
    TerminationReached,
    Stopped,
}

/// Drives a [`Population`] through successive generations.
///
/// Each step selects parents from the current generation, recombines them in
/// groups of [`CrossoverStrategy::parents_number`], mutates the offspring,
/// lets the reinsertion strategy assemble the next generation, evaluates the
/// chromosomes lacking a fitness on the task executor and ends the generation.
/// The termination condition is then checked, followed by any pending stop
/// request.
///
/// `start` and `resume` block until the evolution terminates, stops or fails.
/// Use [`GeneticAlgorithm::handle`] to stop it from another thread or from an
/// observer.
///
/// # Example
///
/// ```rust
/// use evolvex::chromosome::Chromosome;
/// use evolvex::crossover::UniformCrossover;
/// use evolvex::error::BoxError;
/// use evolvex::evolution::{EvolutionState, GeneticAlgorithm};
/// use evolvex::mutation::UniformMutation;
/// use evolvex::population::Population;
/// use evolvex::rng::RandomNumberGenerator;
/// use evolvex::selection::EliteSelection;
/// use evolvex::termination::GenerationNumberTermination;
///
/// #[derive(Debug, Clone)]
/// struct Bits {
///     genes: Vec<bool>,
///     fitness: Option<f64>,
/// }
///
/// impl Chromosome for Bits {
///     type Gene = bool;
///
///     fn genes(&self) -> &[bool] {
///         &self.genes
///     }
///
///     fn genes_mut(&mut self) -> &mut [bool] {
///         &mut self.genes
///     }
///
///     fn generate_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> bool {
///         rng.next_f64() < 0.5
///     }
///
///     fn fitness(&self) -> Option<f64> {
///         self.fitness
///     }
///
///     fn set_fitness(&mut self, fitness: Option<f64>) {
///         self.fitness = fitness;
///     }
/// }
///
/// let population = Population::new(10, 10, |rng: &mut RandomNumberGenerator| Bits {
///     genes: (0..16).map(|_| rng.next_f64() < 0.5).collect(),
///     fitness: None,
/// })
/// .unwrap();
///
/// let mut algorithm = GeneticAlgorithm::builder()
///     .with_population(population)
///     .with_fitness(|bits: &Bits| -> Result<f64, BoxError> {
///         Ok(bits.genes.iter().filter(|g| **g).count() as f64)
///     })
///     .with_selection(EliteSelection)
///     .with_crossover(UniformCrossover::default())
///     .with_mutation(UniformMutation::new())
///     .with_termination(GenerationNumberTermination::new(20))
///     .build()
///     .unwrap();
///
/// algorithm.start().unwrap();
///
/// assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
/// assert_eq!(algorithm.generations_number(), 20);
/// assert!(algorithm.best_chromosome().is_some());
/// ```
pub struct GeneticAlgorithm<C: Chromosome> {
    pub(super) population: Population<C>,
    pub(super) fitness: Arc<dyn FitnessFunction<C>>,
    pub(super) selection: Box<dyn SelectionStrategy<C>>,
    pub(super) crossover: Box<dyn CrossoverStrategy<C>>,
    pub(super) mutation: Box<dyn MutationStrategy<C>>,
    pub(super) reinsertion: Box<dyn ReinsertionStrategy<C>>,
    pub(super) termination: Box<dyn TerminationCondition>,
    pub(super) task_executor: Box<dyn TaskExecutor>,
    pub(super) options: EvolutionOptions,
    pub(super) rng: RandomNumberGenerator,
    pub(super) time_evolving: Duration,
    pub(super) handle: EvolutionHandle,
    pub(super) observers: Vec<Box<dyn EvolutionObserver<C>>>,
}

impl<C: Chromosome> GeneticAlgorithm<C> {
    /// Creates an algorithm with the default reinsertion, termination, task
    /// executor and options.
    pub fn new<F, S, X, M>(
        population: Population<C>,
        fitness: F,
        selection: S,
        crossover: X,
        mutation: M,
    ) -> Result<Self>
    where
        F: FitnessFunction<C> + 'static,
        S: SelectionStrategy<C> + 'static,
        X: CrossoverStrategy<C> + 'static,
        M: MutationStrategy<C> + 'static,
    {
        Self::builder()
            .with_population(population)
            .with_fitness(fitness)
            .with_selection(selection)
            .with_crossover(crossover)
            .with_mutation(mutation)
            .build()
    }

    pub fn builder() -> GeneticAlgorithmBuilder<C> {
        GeneticAlgorithmBuilder::new()
    }

    /// Creates the initial generation and evolves until the termination
    /// condition is reached or a stop is requested.
    ///
    /// An algorithm whose initial generation could not be created may be
    /// started again.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidState`] if the algorithm was already
    /// started. Any failure while evolving is returned after the algorithm
    /// has moved to [`EvolutionState::Stopped`].
    pub fn start(&mut self) -> Result<()> {
        {
            let mut control = self.handle.lock();
            let restartable = control.state == EvolutionState::Stopped
                && self.population.generations_number() == 0;
            if control.state != EvolutionState::NotStarted && !restartable {
                return Err(GeneticError::InvalidState(
                    "Attempt to start a genetic algorithm which was already started. Use resume to continue the evolution".to_string(),
                ));
            }
            control.state = EvolutionState::Started;
            control.stop_requested = false;
        }
        info!(
            min_size = self.population.min_size(),
            max_size = self.population.max_size(),
            termination = ?self.termination,
            "Starting evolution"
        );

        self.time_evolving = Duration::ZERO;
        self.run(|algorithm| {
            let started = Instant::now();
            algorithm
                .population
                .create_initial_generation(&mut algorithm.rng)?;
            algorithm.time_evolving += started.elapsed();
            algorithm.publish_progress();

            algorithm.evolve()
        })
    }

    /// Continues a stopped evolution from its current generation.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidState`] if the algorithm is running, was
    /// never started, or already satisfies its termination condition.
    pub fn resume(&mut self) -> Result<()> {
        {
            let mut control = self.handle.lock();
            if control.state.is_running() {
                return Err(GeneticError::InvalidState(
                    "Attempt to resume a genetic algorithm which is already running".to_string(),
                ));
            }
            let generations = self.population.generations_number();
            if generations == 0 {
                return Err(GeneticError::InvalidState(
                    "Attempt to resume a genetic algorithm which was not yet started".to_string(),
                ));
            }
            // an unended generation is not counted as reached yet
            let ended = self
                .population
                .current_generation()
                .is_some_and(|g| g.is_ended());
            if generations > 1 && ended && self.termination.has_reached(&self.snapshot()) {
                return Err(GeneticError::InvalidState(format!(
                    "Attempt to resume a genetic algorithm whose termination {:?} was already reached. Change the termination or raise its limit",
                    self.termination
                )));
            }
            control.state = EvolutionState::Resumed;
            control.stop_requested = false;
        }
        info!(
            generation = self.population.generations_number(),
            "Resuming evolution"
        );

        self.run(Self::evolve)
    }

    /// Requests a stop, honoured once the generation in progress has ended.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidState`] if the algorithm was never started.
    pub fn stop(&self) -> Result<()> {
        self.handle.stop()
    }

    /// A cloneable handle to watch or stop the evolution from elsewhere.
    pub fn handle(&self) -> EvolutionHandle {
        self.handle.clone()
    }

    /// Registers an observer; observers are notified in registration order.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: EvolutionObserver<C> + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> EvolutionState {
        self.handle.state()
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    pub fn generations_number(&self) -> usize {
        self.population.generations_number()
    }

    /// Best chromosome of the last ended generation.
    pub fn best_chromosome(&self) -> Option<&C> {
        self.population.best_chromosome()
    }

    /// Cumulative time spent evolving, across start and every resume.
    pub fn time_evolving(&self) -> Duration {
        self.time_evolving
    }

    pub fn population(&self) -> &Population<C> {
        &self.population
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn termination(&self) -> &dyn TerminationCondition {
        self.termination.as_ref()
    }

    /// The state a termination condition is evaluated against.
    pub fn snapshot(&self) -> EvolutionSnapshot {
        EvolutionSnapshot {
            generations_number: self.population.generations_number(),
            best_fitness: self.best_chromosome().and_then(|c| c.fitness()),
            time_evolving: self.time_evolving,
        }
    }

    pub fn set_selection<S>(&mut self, selection: S)
    where
        S: SelectionStrategy<C> + 'static,
    {
        self.selection = Box::new(selection);
    }

    /// Replaces the crossover.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if the crossover needs more parents
    /// than the population's minimum size.
    pub fn set_crossover<X>(&mut self, crossover: X) -> Result<()>
    where
        X: CrossoverStrategy<C> + 'static,
    {
        check_crossover(&crossover, &self.population)?;
        self.crossover = Box::new(crossover);
        Ok(())
    }

    pub fn set_mutation<M>(&mut self, mutation: M)
    where
        M: MutationStrategy<C> + 'static,
    {
        self.mutation = Box::new(mutation);
    }

    pub fn set_reinsertion<R>(&mut self, reinsertion: R)
    where
        R: ReinsertionStrategy<C> + 'static,
    {
        self.reinsertion = Box::new(reinsertion);
    }

    pub fn set_termination<T>(&mut self, termination: T)
    where
        T: TerminationCondition + 'static,
    {
        self.termination = Box::new(termination);
    }

    pub fn set_task_executor<E>(&mut self, task_executor: E)
    where
        E: TaskExecutor + 'static,
    {
        self.task_executor = Box::new(task_executor);
    }

    pub fn set_crossover_probability(&mut self, probability: f64) -> Result<()> {
        self.options.set_crossover_probability(probability)
    }

    pub fn set_mutation_probability(&mut self, probability: f64) -> Result<()> {
        self.options.set_mutation_probability(probability)
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.options.set_log_level(log_level);
    }

    /// Runs `body` and moves to `Stopped` on any error or panic escaping it,
    /// observer callbacks included. Panics are resumed once the state is set.
    fn run<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| body(self))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(self.fail(e)),
            Err(payload) => {
                warn!(
                    panic = %panic_message(payload.as_ref()),
                    generation = self.population.generations_number(),
                    "Evolution stopped by a panic"
                );
                self.halt();
                panic::resume_unwind(payload)
            }
        }
    }

    fn evolve(&mut self) -> Result<()> {
        // a generation left unfinished by a failure is evaluated again first
        let mut needs_new_generation = self
            .population
            .current_generation()
            .is_some_and(|g| g.is_ended());

        loop {
            let started = Instant::now();
            if needs_new_generation {
                self.evolve_one_generation()?;
            }
            self.evaluate_fitness()?;
            self.population.end_current_generation()?;
            self.time_evolving += started.elapsed();

            self.publish_progress();
            self.log_generation();
            self.notify(Notification::GenerationRan);

            match self.check_boundary() {
                Boundary::Continue => needs_new_generation = true,
                Boundary::TerminationReached => {
                    info!(
                        generation = self.population.generations_number(),
                        best_fitness = ?self.snapshot().best_fitness,
                        time_evolving = ?self.time_evolving,
                        "Termination reached"
                    );
                    self.notify(Notification::TerminationReached);
                    return Ok(());
                }
                Boundary::Stopped => {
                    info!(
                        generation = self.population.generations_number(),
                        "Evolution stopped on request"
                    );
                    self.notify(Notification::Stopped);
                    return Ok(());
                }
            }
        }
    }

    fn evolve_one_generation(&mut self) -> Result<()> {
        let current = self.population.current_generation().ok_or_else(|| {
            GeneticError::InvalidState("The population has no generation to evolve from".to_string())
        })?;
        let parents =
            self.selection
                .select_chromosomes(self.population.min_size(), current, &mut self.rng)?;

        let mut offspring = self.cross(&parents)?;
        self.mutate(&mut offspring)?;

        let next = self.reinsertion.select_chromosomes(
            &self.population,
            offspring,
            parents,
            &mut self.rng,
        )?;
        self.population.create_new_generation(next)
    }

    fn cross(&mut self, parents: &[C]) -> Result<Vec<C>> {
        let group_size = self.crossover.parents_number();
        let mut offspring = Vec::with_capacity(parents.len());

        for group in parents.chunks(group_size) {
            // incomplete trailing groups are carried over untouched
            if group.len() == group_size
                && self.rng.next_f64() < self.options.crossover_probability()
            {
                offspring.extend(self.crossover.cross(group, &mut self.rng)?);
            } else {
                offspring.extend_from_slice(group);
            }
        }

        Ok(offspring)
    }

    fn mutate(&mut self, offspring: &mut [C]) -> Result<()> {
        let probability = self.options.mutation_probability();
        for chromosome in offspring.iter_mut() {
            self.mutation.mutate(chromosome, probability, &mut self.rng)?;
        }
        Ok(())
    }

    /// Scores every chromosome of the current generation lacking a fitness,
    /// one executor job each, then sorts the generation.
    fn evaluate_fitness(&mut self) -> Result<()> {
        let generation = self.population.current_generation_mut().ok_or_else(|| {
            GeneticError::InvalidState("The population has no generation to evaluate".to_string())
        })?;

        let mut slots = Vec::new();
        for (index, chromosome) in generation.chromosomes().iter().enumerate() {
            if chromosome.fitness().is_some() {
                continue;
            }

            let slot = Arc::new(OnceLock::new());
            let job_slot = Arc::clone(&slot);
            let fitness = Arc::clone(&self.fitness);
            let chromosome = chromosome.clone();
            self.task_executor.add(Box::new(move || {
                let score = evaluate_chromosome(fitness.as_ref(), &chromosome)?;
                let _ = job_slot.set(score);
                Ok(())
            }));
            slots.push((index, slot));
        }

        if !slots.is_empty() {
            debug!(
                generation = generation.number(),
                jobs = slots.len(),
                "Evaluating fitness"
            );

            let outcome = self.task_executor.start();
            self.task_executor.clear();
            if !outcome? {
                return Err(GeneticError::ExecutorTimeout(
                    self.task_executor.timeout().unwrap_or_default(),
                ));
            }

            let chromosomes = generation.chromosomes_mut();
            for (index, slot) in slots {
                let score = slot.get().copied().ok_or_else(|| {
                    GeneticError::Executor(format!(
                        "The fitness job of chromosome {} completed without a score",
                        index
                    ))
                })?;
                chromosomes[index].set_fitness(Some(score));
            }
        }

        generation.sort_by_fitness()
    }

    fn check_boundary(&self) -> Boundary {
        let reached = self.termination.has_reached(&self.snapshot());

        let mut control = self.handle.lock();
        if reached {
            control.state = EvolutionState::TerminationReached;
            control.stop_requested = false;
            Boundary::TerminationReached
        } else if control.stop_requested {
            control.state = EvolutionState::Stopped;
            control.stop_requested = false;
            Boundary::Stopped
        } else {
            Boundary::Continue
        }
    }

    fn fail(&self, error: GeneticError) -> GeneticError {
        warn!(
            error = %error,
            generation = self.population.generations_number(),
            "Evolution stopped by a failure"
        );
        self.halt();
        error
    }

    fn halt(&self) {
        {
            let mut control = self.handle.lock();
            control.state = EvolutionState::Stopped;
            control.stop_requested = false;
            control.generations_number = self.population.generations_number();
        }
        self.notify(Notification::Stopped);
    }

    fn publish_progress(&self) {
        self.handle.lock().generations_number = self.population.generations_number();
    }

    fn notify(&self, notification: Notification) {
        for observer in &self.observers {
            match notification {
                Notification::GenerationRan => observer.on_generation_ran(self),
                Notification::TerminationReached => observer.on_termination_reached(self),
                Notification::Stopped => observer.on_stopped(self),
            }
        }
    }

    fn log_generation(&self) {
        let Some(generation) = self.population.current_generation() else {
            return;
        };
        let best_fitness = generation.best_chromosome().and_then(|c| c.fitness());

        match self.options.log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => {
                info!(
                    generation = generation.number(),
                    best_fitness = ?best_fitness,
                    "Generation ran"
                );
            }
            LogLevel::Verbose => {
                info!(
                    generation = generation.number(),
                    best_fitness = ?best_fitness,
                    size = generation.len(),
                    time_evolving = ?self.time_evolving,
                    "Generation ran"
                );
                for chromosome in generation.chromosomes() {
                    debug!(
                        generation = generation.number(),
                        fitness = ?chromosome.fitness(),
                        chromosome = ?chromosome,
                        "Chromosome"
                    );
                }
            }
        }
    }
}

/// Rejects crossovers that could never run on `population`.
pub(super) fn check_crossover<C: Chromosome>(
    crossover: &dyn CrossoverStrategy<C>,
    population: &Population<C>,
) -> Result<()> {
    if crossover.parents_number() < 2 || crossover.children_number() < 1 {
        return Err(GeneticError::Argument(format!(
            "{:?} must take at least 2 parents and produce at least 1 child",
            crossover
        )));
    }
    if crossover.parents_number() > population.min_size() {
        return Err(GeneticError::Argument(format!(
            "{:?} needs {} parents but the population minimum size is {}",
            crossover,
            crossover.parents_number(),
            population.min_size()
        )));
    }
    Ok(())
}

fn evaluate_chromosome<C: Chromosome>(
    fitness: &dyn FitnessFunction<C>,
    chromosome: &C,
) -> Result<f64> {
    match panic::catch_unwind(AssertUnwindSafe(|| fitness.evaluate(chromosome))) {
        Ok(Ok(score)) if score.is_finite() => Ok(score),
        Ok(Ok(score)) => Err(GeneticError::FitnessEvaluation {
            message: format!("Non-finite fitness score {} for {:?}", score, chromosome),
            source: None,
        }),
        Ok(Err(e)) => Err(GeneticError::fitness_evaluation(
            format!("Error executing fitness function for {:?}: {}", chromosome, e),
            e,
        )),
        Err(payload) => Err(GeneticError::FitnessEvaluation {
            message: format!(
                "Fitness function panicked for {:?}: {}",
                chromosome,
                panic_message(payload.as_ref())
            ),
            source: None,
        }),
    }
}

impl<C: Chromosome> fmt::Debug for GeneticAlgorithm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("state", &self.state())
            .field("population", &self.population)
            .field("selection", &self.selection)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .field("reinsertion", &self.reinsertion)
            .field("termination", &self.termination)
            .field("task_executor", &self.task_executor)
            .field("options", &self.options)
            .field("time_evolving", &self.time_evolving)
            .field("observers", &self.observers.len())
            .finish()
    }
}
