//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single randomness source used by
//! every stochastic operator: selection draws, crossover coin flips, mutation
//! trials and reinsertion padding. It wraps the `rand` crate's `StdRng`, so a
//! run becomes exactly reproducible once the generator is seeded.
//!
//! ## Example
//!
//! ```rust
//! use evolvex::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let coin = rng.next_f64();
//! assert!((0.0..1.0).contains(&coin));
//!
//! let cut_points = rng.unique_ints_in_range(2, 0, 10).unwrap();
//! assert_eq!(cut_points.len(), 2);
//! assert_ne!(cut_points[0], cut_points[1]);
//! ```

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::error::{GeneticError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// genetic operators need.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators built from the same seed produce the same sequence,
    /// which makes whole evolution runs replayable.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniformly distributed value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniformly distributed value in `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Range`] if `min > max`.
    pub fn double_in_range(&mut self, min: f64, max: f64) -> Result<f64> {
        if min > max {
            return Err(GeneticError::Range(format!(
                "Minimum value ({}) must not exceed maximum value ({})",
                min, max
            )));
        }
        if min == max {
            return Ok(min);
        }
        Ok(self.rng.gen_range(min..max))
    }

    /// Returns an integer in `[min, max)`. When `min == max` the single
    /// candidate `min` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Range`] if `min > max`.
    pub fn int_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(GeneticError::Range(format!(
                "Minimum value ({}) must not exceed maximum value ({})",
                min, max
            )));
        }
        if min == max {
            return Ok(min);
        }
        Ok(self.rng.gen_range(min..max))
    }

    /// Returns `count` integers in `[min, max)`, repetitions allowed.
    pub fn ints_in_range(&mut self, count: usize, min: i64, max: i64) -> Result<Vec<i64>> {
        (0..count).map(|_| self.int_in_range(min, max)).collect()
    }

    /// Returns `count` distinct integers in `[min, max)`, in draw order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Range`] if `min > max` or if the range holds
    /// fewer than `count` values.
    pub fn unique_ints_in_range(&mut self, count: usize, min: i64, max: i64) -> Result<Vec<i64>> {
        if min > max {
            return Err(GeneticError::Range(format!(
                "Minimum value ({}) must not exceed maximum value ({})",
                min, max
            )));
        }
        let span = (max - min) as u64;
        if count as u64 > span {
            return Err(GeneticError::Range(format!(
                "Cannot draw {} unique values from a range of {}",
                count, span
            )));
        }
        Ok(index::sample(&mut self.rng, span as usize, count)
            .into_iter()
            .map(|offset| min + offset as i64)
            .collect())
    }

    /// Returns an index in `[0, len)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Range`] if `len` is zero.
    pub fn index_below(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(GeneticError::Range(
                "Cannot draw an index from an empty range".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..len))
    }

    /// Returns `count` distinct indexes in `[0, len)`, in draw order.
    pub fn unique_indexes(&mut self, count: usize, len: usize) -> Result<Vec<usize>> {
        if count > len {
            return Err(GeneticError::Range(format!(
                "Cannot draw {} unique indexes below {}",
                count, len
            )));
        }
        Ok(index::sample(&mut self.rng, len, count).into_vec())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
