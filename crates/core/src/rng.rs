//! RNG module - deterministic shape selection
//!
//! Shapes are drawn either uniformly (repeats allowed) or from a shuffled 7-bag. Both
//! policies run on a small seeded LCG so a session can be replayed from its seed.

use crate::types::{RandomizerKind, ShapeKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`, taken from the high bits (the low bits of an LCG are weak)
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to continue the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of the next shape to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    kind: RandomizerKind,
    bag: [ShapeKind; 7],
    /// Index into the current bag; only used by the bag policy
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        Self {
            kind,
            bag: ShapeKind::ALL,
            // Forces a shuffle on the first bag draw
            bag_index: ShapeKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> ShapeKind {
        match self.kind {
            RandomizerKind::Uniform => {
                ShapeKind::ALL[self.rng.next_range(ShapeKind::ALL.len() as u32) as usize]
            }
            RandomizerKind::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// The shape the next [`PieceQueue::draw`] will return, without consuming it
    pub fn peek(&self) -> ShapeKind {
        self.clone().draw()
    }

    /// Current RNG state, used to reseed on restart so a new game does not repeat the last
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
