//! # Chromosome Trait
//!
//! The `Chromosome` trait defines the genotype the engine evolves: a
//! fixed-length, ordered sequence of genes plus an optional fitness value.
//! Operators only ever read genes, replace genes in place, clone chromosomes
//! and ask the chromosome for a fresh random gene, so the gene type itself
//! stays problem specific.
//!
//! ## Example
//!
//! ```rust
//! use evolvex::chromosome::Chromosome;
//! use evolvex::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Word {
//!     letters: Vec<char>,
//!     fitness: Option<f64>,
//! }
//!
//! impl Chromosome for Word {
//!     type Gene = char;
//!
//!     fn genes(&self) -> &[char] {
//!         &self.letters
//!     }
//!
//!     fn genes_mut(&mut self) -> &mut [char] {
//!         &mut self.letters
//!     }
//!
//!     fn generate_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> char {
//!         (b'a' + rng.index_below(26).unwrap_or(0) as u8) as char
//!     }
//!
//!     fn fitness(&self) -> Option<f64> {
//!         self.fitness
//!     }
//!
//!     fn set_fitness(&mut self, fitness: Option<f64>) {
//!         self.fitness = fitness;
//!     }
//! }
//!
//! let mut word = Word { letters: vec!['c', 'a', 't'], fitness: Some(0.4) };
//! word.replace_gene(0, 'b').unwrap();
//!
//! assert_eq!(word.genes(), &['b', 'a', 't']);
//! assert_eq!(word.fitness(), None);
//! ```

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Trait for the genetic encoding of a candidate solution.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync`: chromosomes are cloned into offspring and moved into fitness
/// jobs that may run on worker threads. `Clone` must be a deep copy so an
/// offspring never shares gene storage with its parent.
pub trait Chromosome: Clone + Debug + Send + Sync + 'static {
    /// The problem specific gene type.
    type Gene: Clone + Debug + PartialEq + Send + Sync;

    /// Returns the genes in order.
    fn genes(&self) -> &[Self::Gene];

    /// Returns the genes for in place modification. Implementations hand out
    /// a slice so the chromosome length cannot change.
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    /// Generates a random legal gene for position `index`.
    fn generate_gene(&self, index: usize, rng: &mut RandomNumberGenerator) -> Self::Gene;

    /// Returns the fitness, or `None` if the chromosome has not been evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Stores the fitness computed by the evaluation step.
    fn set_fitness(&mut self, fitness: Option<f64>);

    /// Returns the number of genes.
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Returns true if the chromosome has no genes.
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }

    /// Replaces the gene at `index` and clears the fitness, which no longer
    /// describes the changed genes.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Range`] if `index` is outside the chromosome.
    fn replace_gene(&mut self, index: usize, gene: Self::Gene) -> Result<()> {
        let len = self.len();
        match self.genes_mut().get_mut(index) {
            Some(slot) => *slot = gene,
            None => {
                return Err(GeneticError::Range(format!(
                    "Gene index {} is outside a chromosome of length {}",
                    index, len
                )))
            }
        }
        self.set_fitness(None);
        Ok(())
    }

    /// Replaces the genes starting at `start` with `genes`.
    fn replace_genes(&mut self, start: usize, genes: &[Self::Gene]) -> Result<()> {
        if start + genes.len() > self.len() {
            return Err(GeneticError::Range(format!(
                "Cannot write {} genes at index {} of a chromosome of length {}",
                genes.len(),
                start,
                self.len()
            )));
        }
        self.genes_mut()[start..start + genes.len()].clone_from_slice(genes);
        self.set_fitness(None);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Digits;
    use super::*;

    #[test]
    fn test_replace_gene_clears_fitness() {
        let mut chromosome = Digits::scored(vec![1, 2, 3], 0.5);
        chromosome.replace_gene(1, 9).unwrap();

        assert_eq!(chromosome.genes, vec![1, 9, 3]);
        assert_eq!(chromosome.fitness(), None);
    }

    #[test]
    fn test_replace_gene_out_of_range() {
        let mut chromosome = Digits::scored(vec![1, 2, 3], 0.5);
        let result = chromosome.replace_gene(3, 9);

        assert!(matches!(result, Err(GeneticError::Range(_))));
        assert_eq!(chromosome.fitness(), Some(0.5));
    }

    #[test]
    fn test_replace_genes() {
        let mut chromosome = Digits::new(vec![0, 0, 0, 0]);
        chromosome.replace_genes(1, &[7, 8]).unwrap();
        assert_eq!(chromosome.genes, vec![0, 7, 8, 0]);
        assert!(chromosome.replace_genes(3, &[1, 2]).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Digits::new(vec![1, 2, 3]);
        let mut copy = original.clone();
        copy.replace_gene(0, 5).unwrap();

        assert_eq!(original.genes, vec![1, 2, 3]);
        assert_eq!(copy.genes, vec![5, 2, 3]);
    }
}
