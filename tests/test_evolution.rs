use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use evolvex::{
    chromosome::Chromosome,
    crossover::{TwoPointCrossover, UniformCrossover},
    error::{BoxError, GeneticError},
    evolution::{
        ChannelObserver, EvolutionEvent, EvolutionOptions, EvolutionState, GeneticAlgorithm,
        LogLevel,
    },
    executor::ParallelTaskExecutor,
    mutation::UniformMutation,
    population::Population,
    reinsertion::UniformReinsertion,
    rng::RandomNumberGenerator,
    selection::{EliteSelection, RouletteWheelSelection, TournamentSelection},
    termination::{
        AndTermination, FitnessThresholdTermination, GenerationNumberTermination, OrTermination,
        TimeEvolvingTermination,
    },
};

#[derive(Clone, Debug, PartialEq)]
struct Bits {
    genes: Vec<bool>,
    fitness: Option<f64>,
}

impl Chromosome for Bits {
    type Gene = bool;

    fn genes(&self) -> &[bool] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }

    fn generate_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> bool {
        rng.next_f64() < 0.5
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: Option<f64>) {
        self.fitness = fitness;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn bits_population(min: usize, max: usize, length: usize) -> Population<Bits> {
    Population::new(min, max, move |rng: &mut RandomNumberGenerator| Bits {
        genes: (0..length).map(|_| rng.next_f64() < 0.5).collect(),
        fitness: None,
    })
    .unwrap()
}

fn ones(bits: &Bits) -> Result<f64, BoxError> {
    Ok(bits.genes.iter().filter(|g| **g).count() as f64)
}

#[test]
fn test_runs_the_requested_number_of_generations() {
    init_tracing();
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(4, 4, 10))
        .with_fitness(ones)
        .with_selection(EliteSelection)
        .with_crossover(UniformCrossover::default())
        .with_mutation(UniformMutation::new())
        .with_termination(GenerationNumberTermination::new(5))
        .with_options(
            EvolutionOptions::builder()
                .log_level(LogLevel::Verbose)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    algorithm.start().unwrap();

    assert_eq!(algorithm.generations_number(), 5);
    assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
    assert!(!algorithm.is_running());

    let generations = algorithm.population().generations();
    for pair in generations.windows(2) {
        assert_eq!(pair[1].number(), pair[0].number() + 1);
    }
    for generation in generations {
        let fitness: Vec<f64> = generation
            .chromosomes()
            .iter()
            .map(|c| c.fitness().unwrap())
            .collect();
        assert!(fitness.windows(2).all(|w| w[0] >= w[1]));
        assert!(generation.len() <= 4);
    }
}

#[test]
fn test_one_max_on_a_worker_pool() {
    init_tracing();
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(20, 30, 24))
        .with_fitness(ones)
        .with_selection(TournamentSelection::default())
        .with_crossover(TwoPointCrossover::new())
        .with_mutation(UniformMutation::new())
        .with_reinsertion(UniformReinsertion)
        .with_termination(OrTermination::new(
            FitnessThresholdTermination::new(24.0),
            GenerationNumberTermination::new(200),
        ))
        .with_task_executor(ParallelTaskExecutor::new(2, 4).unwrap())
        .with_options(
            EvolutionOptions::builder()
                .mutation_probability(0.05)
                .seed(2024)
                .log_level(LogLevel::Minimal)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    algorithm.start().unwrap();

    assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
    let current = algorithm.population().current_generation().unwrap();
    let best = algorithm.best_chromosome().unwrap();
    assert_eq!(best.fitness(), current.chromosomes()[0].fitness());
    assert!(current.chromosomes().iter().all(|c| c.fitness().is_some()));
    assert!(algorithm.generations_number() >= 1 && algorithm.generations_number() <= 200);
}

#[test]
fn test_stop_from_another_thread_and_resume() {
    init_tracing();
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(6, 6, 16))
        .with_fitness(|bits: &Bits| -> Result<f64, BoxError> {
            thread::sleep(Duration::from_millis(1));
            ones(bits)
        })
        .with_selection(RouletteWheelSelection)
        .with_crossover(UniformCrossover::default())
        .with_mutation(UniformMutation::new())
        .with_termination(GenerationNumberTermination::new(100_000))
        .build()
        .unwrap();
    let handle = algorithm.handle();
    assert!(handle.stop().is_err());

    let worker = thread::spawn(move || {
        let result = algorithm.start();
        (algorithm, result)
    });

    let deadline = Instant::now() + Duration::from_secs(10);
    while handle.generations_number() < 2 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    assert!(handle.is_running());
    handle.stop().unwrap();

    let (mut algorithm, result) = worker.join().unwrap();
    result.unwrap();

    let stopped_at = algorithm.generations_number();
    assert!(stopped_at >= 2);
    assert_eq!(algorithm.state(), EvolutionState::Stopped);
    // the stop lands between generations
    assert!(algorithm.population().current_generation().unwrap().is_ended());

    algorithm.set_termination(GenerationNumberTermination::new(stopped_at + 3));
    let (observer, events) = ChannelObserver::channel();
    algorithm.subscribe(observer);
    algorithm.resume().unwrap();

    assert_eq!(algorithm.generations_number(), stopped_at + 3);
    assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
    let generations: Vec<usize> = events
        .try_iter()
        .filter_map(|event| match event {
            EvolutionEvent::GenerationRan { generation, .. } => Some(generation),
            _ => None,
        })
        .collect();
    assert_eq!(
        generations,
        vec![stopped_at + 1, stopped_at + 2, stopped_at + 3]
    );
}

#[test]
fn test_time_evolving_accumulates_until_the_limit() {
    let mut algorithm = GeneticAlgorithm::new(
        bits_population(4, 4, 8),
        |bits: &Bits| -> Result<f64, BoxError> {
            thread::sleep(Duration::from_millis(2));
            ones(bits)
        },
        EliteSelection,
        UniformCrossover::default(),
        UniformMutation::new(),
    )
    .unwrap();
    algorithm.set_termination(TimeEvolvingTermination::new(Duration::from_millis(40)));

    algorithm.start().unwrap();

    assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
    assert!(algorithm.time_evolving() >= Duration::from_millis(40));
    assert_eq!(algorithm.snapshot().time_evolving, algorithm.time_evolving());
}

#[test]
fn test_and_termination_waits_for_both() {
    let mut algorithm = GeneticAlgorithm::new(
        bits_population(4, 4, 8),
        ones,
        EliteSelection,
        UniformCrossover::default(),
        UniformMutation::new(),
    )
    .unwrap();
    algorithm.set_termination(AndTermination::new(
        GenerationNumberTermination::new(4),
        FitnessThresholdTermination::new(0.0),
    ));

    algorithm.start().unwrap();

    assert_eq!(algorithm.generations_number(), 4);
}

#[test]
fn test_fitness_failure_keeps_its_cause() {
    let evaluated = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluated);
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(8, 8, 8))
        .with_fitness(move |bits: &Bits| -> Result<f64, BoxError> {
            if counter.fetch_add(1, Ordering::SeqCst) == 5 {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt lookup table").into());
            }
            ones(bits)
        })
        .with_selection(EliteSelection)
        .with_crossover(UniformCrossover::default())
        .with_mutation(UniformMutation::new())
        .with_task_executor(ParallelTaskExecutor::new(1, 4).unwrap())
        .build()
        .unwrap();

    let error = algorithm.start().unwrap_err();

    match &error {
        GeneticError::FitnessEvaluation {
            source: Some(source),
            ..
        } => {
            let io_error = source.downcast_ref::<io::Error>().unwrap();
            assert_eq!(io_error.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("Expected a fitness evaluation error, got {:?}", other),
    }
    assert_eq!(algorithm.state(), EvolutionState::Stopped);
    // the pool finishes the batch before reporting
    assert_eq!(evaluated.load(Ordering::SeqCst), 8);
}

#[test]
fn test_resume_after_termination_is_rejected() {
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(4, 4, 8))
        .with_fitness(ones)
        .with_selection(EliteSelection)
        .with_crossover(UniformCrossover::default())
        .with_mutation(UniformMutation::new())
        .with_termination(GenerationNumberTermination::new(3))
        .build()
        .unwrap();

    assert!(matches!(
        algorithm.resume(),
        Err(GeneticError::InvalidState(_))
    ));
    algorithm.start().unwrap();
    assert!(matches!(
        algorithm.resume(),
        Err(GeneticError::InvalidState(_))
    ));
    assert!(matches!(
        algorithm.start(),
        Err(GeneticError::InvalidState(_))
    ));
    assert_eq!(algorithm.generations_number(), 3);
}

#[test]
fn test_resume_completes_a_generation_left_unevaluated() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut algorithm = GeneticAlgorithm::builder()
        .with_population(bits_population(4, 4, 8))
        .with_fitness(move |bits: &Bits| -> Result<f64, BoxError> {
            // generation 1 takes the first four calls
            if counter.fetch_add(1, Ordering::SeqCst) == 4 {
                return Err("scoring service unavailable".into());
            }
            ones(bits)
        })
        .with_selection(EliteSelection)
        .with_crossover(UniformCrossover::default())
        .with_mutation(UniformMutation::new())
        .with_termination(GenerationNumberTermination::new(2))
        .with_options(EvolutionOptions::new(1.0, 0.0, LogLevel::None).unwrap())
        .build()
        .unwrap();

    assert!(matches!(
        algorithm.start(),
        Err(GeneticError::FitnessEvaluation { .. })
    ));
    assert_eq!(algorithm.state(), EvolutionState::Stopped);
    assert_eq!(algorithm.generations_number(), 2);
    assert!(!algorithm.population().current_generation().unwrap().is_ended());
    assert!(algorithm.best_chromosome().unwrap().fitness().is_some());

    let (observer, events) = ChannelObserver::channel();
    algorithm.subscribe(observer);
    algorithm.resume().unwrap();

    assert_eq!(algorithm.state(), EvolutionState::TerminationReached);
    assert_eq!(algorithm.generations_number(), 2);
    let generations = algorithm.population().generations();
    assert_eq!(generations.len(), 2);
    assert!(generations.iter().all(|g| g.is_ended()));
    assert!(generations[1]
        .chromosomes()
        .iter()
        .all(|c| c.fitness().is_some()));

    let events: Vec<EvolutionEvent> = events.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        EvolutionEvent::GenerationRan { generation: 2, .. }
    ));
    assert_eq!(events[1], EvolutionEvent::TerminationReached { generation: 2 });
}
