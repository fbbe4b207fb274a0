//! RNG module - 7-bag piece randomizer
//!
//! A bag holds one of each of the seven variants in shuffled order and is
//! drawn from its end. An empty bag is refilled with a fresh permutation
//! right before the draw, so every run of seven draws starting at a bag
//! boundary is a permutation of all variants and no variant is absent for
//! more than twelve consecutive pieces.
//!
//! Shuffling uses a small seeded LCG so whole games are reproducible.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

pub type BagContents = ArrayVec<PieceKind, 7>;

#[derive(Debug, Clone)]
pub struct Bag {
    /// Remaining variants; the next draw is the last element.
    pending: BagContents,
    rng: SimpleRng,
    refills: u32,
}

impl Bag {
    /// An empty bag: the first draw triggers the first shuffle.
    pub fn new(seed: u32) -> Self {
        Self {
            pending: BagContents::new(),
            rng: SimpleRng::new(seed),
            refills: 0,
        }
    }

    /// A bag that first yields `upcoming` in order, then continues with
    /// seeded permutations. Duplicates and extra entries beyond seven are
    /// dropped.
    pub fn with_upcoming(seed: u32, upcoming: &[PieceKind]) -> Self {
        let mut pending = BagContents::new();
        for kind in upcoming.iter().take(7).rev() {
            if !pending.contains(kind) {
                pending.push(*kind);
            }
        }
        Self {
            pending,
            rng: SimpleRng::new(seed),
            refills: 0,
        }
    }

    fn refill(&mut self) {
        self.pending.clear();
        self.pending.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.pending);
        self.refills = self.refills.wrapping_add(1);
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.pending.is_empty() {
            self.refill();
        }
        // Refilled above, so the pop always yields.
        self.pending.pop().unwrap_or(PieceKind::I)
    }

    /// Remaining variants in draw order.
    pub fn remaining(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pending.iter().rev().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many times the bag has been reshuffled.
    pub fn refills(&self) -> u32 {
        self.refills
    }

    /// Current RNG state (restarting from it replays the same sequence).
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}
