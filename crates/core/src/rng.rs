//! RNG module - 7-bag random piece generation
//!
//! Implements the "Random Generator" of the guideline: each bag contains one of
//! each piece (I, O, T, S, Z, J, L), shuffled. Whole bags are appended to the
//! pending queue whenever it runs short, so the preview never has to peek
//! across a bag boundary.
//!
//! Also provides a simple LCG for deterministic testing.

use std::collections::VecDeque;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator with a look-ahead queue.
#[derive(Debug, Clone)]
pub struct Randomizer {
    /// Shapes not yet drawn, in draw order
    pending: VecDeque<PieceKind>,
    /// Minimum number of shapes kept pending after every draw
    look_ahead: usize,
    rng: SimpleRng,
    seed: u32,
}

impl Randomizer {
    /// Create a randomizer that always has at least `look_ahead` shapes pending.
    pub fn new(seed: u32, look_ahead: usize) -> Self {
        let mut randomizer = Self {
            pending: VecDeque::with_capacity(look_ahead + 2 * PieceKind::ALL.len()),
            look_ahead,
            rng: SimpleRng::new(seed),
            seed,
        };
        randomizer.top_up();
        randomizer
    }

    /// Append shuffled bags until enough shapes are pending.
    fn top_up(&mut self) {
        while self.pending.len() < self.look_ahead.max(1) {
            let mut bag = PieceKind::ALL;
            self.rng.shuffle(&mut bag);
            self.pending.extend(bag);
        }
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> PieceKind {
        self.top_up();
        let kind = self.pending.pop_front().unwrap_or(PieceKind::I);
        self.top_up();
        kind
    }

    /// Draw `n` shapes in order.
    pub fn draw_many(&mut self, n: usize) -> Vec<PieceKind> {
        (0..n).map(|_| self.draw()).collect()
    }

    /// The next shape without drawing it.
    pub fn peek(&self) -> Option<PieceKind> {
        self.pending.front().copied()
    }

    /// The next `look_ahead` shapes, in draw order.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pending.iter().copied().take(self.look_ahead)
    }

    /// Seed the randomizer was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Drop every pending shape and start over from fresh bags.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.top_up();
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1, crate::types::NEXT_QUEUE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(drawn: &[PieceKind], kind: PieceKind) -> usize {
        drawn.iter().filter(|&&k| k == kind).count()
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_28_draws_yield_each_shape_four_times() {
        let mut randomizer = Randomizer::new(7, 6);
        let drawn = randomizer.draw_many(28);
        for kind in PieceKind::ALL {
            assert_eq!(count(&drawn, kind), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_bag_is_a_permutation() {
        let mut randomizer = Randomizer::new(99, 6);
        for _ in 0..20 {
            let bag = randomizer.draw_many(7);
            for kind in PieceKind::ALL {
                assert_eq!(count(&bag, kind), 1);
            }
        }
    }

    #[test]
    fn test_preview_matches_upcoming_draws() {
        let mut randomizer = Randomizer::new(3, 6);
        // Move off the bag boundary so the preview spans two bags.
        randomizer.draw_many(4);

        let preview: Vec<_> = randomizer.preview().collect();
        assert_eq!(preview.len(), 6);
        assert_eq!(randomizer.peek(), Some(preview[0]));
        assert_eq!(randomizer.draw_many(6), preview);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Randomizer::new(42, 6);
        let mut b = Randomizer::new(42, 6);
        assert_eq!(a.draw_many(50), b.draw_many(50));
    }
}
