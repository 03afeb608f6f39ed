//! Bag module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. Pieces are popped until the bag is empty, then a fresh bag
//! is shuffled. Between two refills every kind appears exactly once, which
//! bounds the gap between two pieces of the same kind to 12.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Shuffle a slice using Fisher-Yates
///
/// For `i` from the last index down to 1, swap element `i` with a uniformly
/// chosen element in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Remaining pieces of the current bag, consumed from the end
    pieces: ArrayVec<PieceKind, 7>,
    rng: StdRng,
}

impl Bag {
    /// Create a bag with a reproducible shuffle order
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a bag seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pieces: ArrayVec::new(),
            rng,
        }
    }

    /// Replace the contents with a freshly shuffled full set
    pub fn fill(&mut self) {
        self.pieces.clear();
        self.pieces.extend(PieceKind::ALL);
        shuffle(&mut self.rng, &mut self.pieces);
    }

    /// Pop the next piece, refilling first when empty
    pub fn next(&mut self) -> PieceKind {
        if self.pieces.is_empty() {
            self.fill();
        }
        // fill() always leaves seven pieces behind
        self.pieces.pop().unwrap_or(PieceKind::I)
    }

    /// Forget the remaining pieces; the next draw starts a new bag
    pub fn reset(&mut self) {
        self.pieces.clear();
    }

    /// Pieces left before the next refill
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }

    /// Next piece without consuming it, if the current bag is not exhausted
    pub fn peek(&self) -> Option<PieceKind> {
        self.pieces.last().copied()
    }
}
