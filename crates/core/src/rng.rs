//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then shuffles a fresh bag.
//!
//! The shuffle is driven by a seeded [`StdRng`], so the same seed always
//! produces the same piece sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Number of pieces in one bag
pub const BAG_SIZE: usize = 7;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Randomizer {
    /// Current bag of pieces
    bag: [PieceKind; BAG_SIZE],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: StdRng,
    seed: u64,
}

impl Randomizer {
    /// Create a new randomizer with the given seed
    pub fn new(seed: u64) -> Self {
        let mut randomizer = Self {
            bag: PieceKind::ALL,
            bag_index: BAG_SIZE,
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        randomizer.refill_bag();
        randomizer
    }

    /// Create a randomizer with a seed drawn from the OS
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Restart the sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.bag_index = 0;
    }

    /// Draw the next piece
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= BAG_SIZE {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces still waiting in the current bag, in draw order.
    pub fn peek_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Seed this randomizer was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(pieces: &[PieceKind]) {
        assert_eq!(pieces.len(), BAG_SIZE);
        for kind in PieceKind::ALL {
            assert_eq!(
                pieces.iter().filter(|&&k| k == kind).count(),
                1,
                "Missing or repeated piece: {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_randomizer_deterministic() {
        let mut r1 = Randomizer::new(12345);
        let mut r2 = Randomizer::new(12345);

        for _ in 0..100 {
            assert_eq!(r1.next(), r2.next());
        }
    }

    #[test]
    fn test_randomizer_different_seeds_diverge() {
        let mut r1 = Randomizer::new(12345);
        let mut r2 = Randomizer::new(54321);

        let a: Vec<_> = (0..70).map(|_| r1.next()).collect();
        let b: Vec<_> = (0..70).map(|_| r2.next()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fourteen_draws_are_two_permutations() {
        let mut randomizer = Randomizer::new(7);
        let drawn: Vec<_> = (0..14).map(|_| randomizer.next()).collect();

        assert_permutation(&drawn[..7]);
        assert_permutation(&drawn[7..]);
    }

    #[test]
    fn test_peek_bag_shrinks_then_refills() {
        let mut randomizer = Randomizer::new(1);
        assert_eq!(randomizer.peek_bag().len(), 7);

        let head = randomizer.peek_bag()[0];
        assert_eq!(randomizer.next(), head);
        assert_eq!(randomizer.peek_bag().len(), 6);

        for _ in 0..6 {
            randomizer.next();
        }
        assert!(randomizer.peek_bag().is_empty());

        randomizer.next();
        assert_eq!(randomizer.peek_bag().len(), 6);
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut randomizer = Randomizer::new(99);
        let first: Vec<_> = (0..10).map(|_| randomizer.next()).collect();

        randomizer.reseed(99);
        let again: Vec<_> = (0..10).map(|_| randomizer.next()).collect();
        assert_eq!(first, again);
        assert_eq!(randomizer.seed(), 99);
    }
}
