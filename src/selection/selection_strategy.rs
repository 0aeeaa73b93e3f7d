use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Generation;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies in genetic algorithms.
///
/// A selection strategy picks the parents of the next generation from the
/// chromosomes of the current one. Implementors provide
/// [`perform_selection`](SelectionStrategy::perform_selection); callers use
/// [`select_chromosomes`](SelectionStrategy::select_chromosomes), which checks
/// the shared preconditions first.
///
/// # Examples
///
/// ```
/// use evolvex::population::Generation;
/// use evolvex::rng::RandomNumberGenerator;
/// use evolvex::selection::{EliteSelection, SelectionStrategy};
/// # use evolvex::chromosome::Chromosome;
/// # #[derive(Clone, Debug)]
/// # struct Value { genes: Vec<i32>, fitness: Option<f64> }
/// # impl Chromosome for Value {
/// #     type Gene = i32;
/// #     fn genes(&self) -> &[i32] { &self.genes }
/// #     fn genes_mut(&mut self) -> &mut [i32] { &mut self.genes }
/// #     fn generate_gene(&self, _: usize, _: &mut RandomNumberGenerator) -> i32 { 0 }
/// #     fn fitness(&self) -> Option<f64> { self.fitness }
/// #     fn set_fitness(&mut self, fitness: Option<f64>) { self.fitness = fitness; }
/// # }
///
/// let generation = Generation::new(
///     1,
///     vec![
///         Value { genes: vec![1], fitness: Some(0.5) },
///         Value { genes: vec![2], fitness: Some(0.8) },
///         Value { genes: vec![3], fitness: Some(0.3) },
///     ],
/// )
/// .unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let selected = EliteSelection::new()
///     .select_chromosomes(2, &generation, &mut rng)
///     .unwrap();
///
/// assert_eq!(selected[0].genes, vec![2]);
/// assert_eq!(selected[1].genes, vec![1]);
/// ```
pub trait SelectionStrategy<C: Chromosome>: Debug + Send + Sync {
    /// Selects `count` chromosomes from `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Argument`] if `count < 2`, and
    /// [`GeneticError::Selection`] if the generation holds chromosomes without
    /// fitness or the strategy's own preconditions are not met.
    fn select_chromosomes(
        &self,
        count: usize,
        generation: &Generation<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if count < 2 {
            return Err(GeneticError::Argument(format!(
                "The number of selected chromosomes should be at least 2, got {}",
                count
            )));
        }
        if !generation.is_evaluated() {
            return Err(GeneticError::Selection(format!(
                "Generation {} has chromosomes without fitness",
                generation.number()
            )));
        }

        self.perform_selection(count, generation, rng)
    }

    /// Selects `count` chromosomes from an evaluated generation.
    fn perform_selection(
        &self,
        count: usize,
        generation: &Generation<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>>;
}

/// Fitness values of a generation, in chromosome order.
pub(crate) fn fitness_values<C: Chromosome>(generation: &Generation<C>) -> Vec<f64> {
    generation
        .chromosomes()
        .iter()
        .map(|c| c.fitness().unwrap_or(0.0))
        .collect()
}
