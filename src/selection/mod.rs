pub mod elite;
pub mod roulette;
pub mod selection_strategy;
pub mod stochastic_universal_sampling;
pub mod tournament;

pub use elite::EliteSelection;
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::SelectionStrategy;
pub use stochastic_universal_sampling::StochasticUniversalSamplingSelection;
pub use tournament::TournamentSelection;

use crate::error::{GeneticError, Result};

/// Builds cumulative selection probabilities proportional to fitness.
///
/// The last entry is forced to exactly 1.0 so floating-point drift never
/// leaves a draw unmatched.
pub(crate) fn cumulative_probabilities(fitness: &[f64]) -> Result<Vec<f64>> {
    if fitness.iter().any(|&f| f < 0.0) {
        return Err(GeneticError::Selection(
            "Fitness proportionate selection requires non-negative fitness values".to_string(),
        ));
    }

    let sum: f64 = fitness.iter().sum();
    if sum <= 0.0 {
        return Err(GeneticError::Selection(
            "Fitness proportionate selection requires at least one chromosome with non-zero fitness"
                .to_string(),
        ));
    }

    let mut cumulative = 0.0;
    let mut probs: Vec<f64> = fitness
        .iter()
        .map(|&f| {
            cumulative += f / sum;
            cumulative
        })
        .collect();

    if let Some(last) = probs.last_mut() {
        *last = 1.0;
    }

    Ok(probs)
}

/// Returns the index of the first cumulative probability reaching `pointer`.
pub(crate) fn spin(cumulative_probs: &[f64], pointer: f64) -> usize {
    cumulative_probs
        .iter()
        .position(|&prob| pointer <= prob)
        .unwrap_or(cumulative_probs.len() - 1)
}
