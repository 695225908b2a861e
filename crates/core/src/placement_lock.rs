//! Extended placement lock (lock delay with move reset).
//!
//! A grounded piece locks once it has rested for the full time allotment, or
//! once it has spent its move budget. Any move or rotation refills the time;
//! reaching a new lowest row refills the moves.

use crate::types::{LOCK_ALLOWED_MOVES, LOCK_ALLOWED_TIME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementLock {
    allowed_moves: u8,
    allowed_time_ms: i32,
    moves_left: i32,
    time_left_ms: i32,
    /// Lowest row the piece has landed on, if it has landed at all
    lowest_row: Option<i8>,
}

impl PlacementLock {
    pub fn new() -> Self {
        Self::with_allotment(LOCK_ALLOWED_MOVES, LOCK_ALLOWED_TIME_MS)
    }

    pub fn with_allotment(allowed_moves: u8, allowed_time_ms: i32) -> Self {
        Self {
            allowed_moves,
            allowed_time_ms,
            moves_left: allowed_moves as i32,
            time_left_ms: allowed_time_ms,
            lowest_row: None,
        }
    }

    /// The piece moved sideways: spend a move, refill the time.
    pub fn moved(&mut self) {
        self.moves_left -= 1;
        self.time_left_ms = self.allowed_time_ms;
    }

    /// Rotations count exactly like moves.
    pub fn rotated(&mut self) {
        self.moved();
    }

    /// The piece rests with its lowest mino on `row`.
    ///
    /// A first landing, or a landing strictly below every previous one, refills
    /// the moves. Time is left alone.
    pub fn landed(&mut self, row: i8) {
        if self.lowest_row.map_or(true, |lowest| row < lowest) {
            self.lowest_row = Some(row);
            self.moves_left = self.allowed_moves as i32;
        }
    }

    pub fn time_passed(&mut self, elapsed_ms: u32) {
        self.time_left_ms = self
            .time_left_ms
            .saturating_sub(elapsed_ms.min(i32::MAX as u32) as i32);
    }

    pub fn should_lock(&self) -> bool {
        self.time_left_ms <= 0 || self.moves_left <= 0
    }

    /// The piece locked: start over for the next one.
    pub fn locked(&mut self) {
        *self = Self::with_allotment(self.allowed_moves, self.allowed_time_ms);
    }

    pub fn moves_left(&self) -> i32 {
        self.moves_left
    }

    pub fn time_left_ms(&self) -> i32 {
        self.time_left_ms
    }

    pub fn lowest_row(&self) -> Option<i8> {
        self.lowest_row
    }
}

impl Default for PlacementLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locks_after_full_time_without_moves() {
        let mut lock = PlacementLock::new();
        lock.time_passed(499);
        assert!(!lock.should_lock());
        lock.time_passed(1);
        assert!(lock.should_lock());
    }

    #[test]
    fn test_fifteen_moves_exhaust_the_budget() {
        let mut lock = PlacementLock::new();
        lock.landed(5);
        for _ in 0..14 {
            lock.moved();
            lock.landed(5);
            assert!(!lock.should_lock());
        }
        lock.rotated();
        assert!(lock.should_lock());
        assert_eq!(lock.time_left_ms(), 500, "time is refilled by every move");
    }

    #[test]
    fn test_new_lowest_row_refills_moves_but_not_time() {
        let mut lock = PlacementLock::new();
        lock.landed(10);
        for _ in 0..10 {
            lock.moved();
        }
        lock.time_passed(300);
        assert_eq!(lock.moves_left(), 5);

        // same row or higher: no refill
        lock.landed(10);
        lock.landed(12);
        assert_eq!(lock.moves_left(), 5);

        lock.landed(9);
        assert_eq!(lock.moves_left(), 15);
        assert_eq!(lock.time_left_ms(), 200);
        assert_eq!(lock.lowest_row(), Some(9));
    }

    #[test]
    fn test_locked_resets_everything() {
        let mut lock = PlacementLock::new();
        lock.landed(3);
        lock.moved();
        lock.time_passed(700);
        assert!(lock.should_lock());

        lock.locked();
        assert_eq!(lock, PlacementLock::new());
    }
}
