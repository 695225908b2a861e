//! Scoring module - guideline line-clear points, back-to-back Tetris bonus and levels
//!
//! Lines cleared are counted in "line units" of 100 points, derived from the
//! line-clear points alone. Drop points go into the score but never into the
//! level goal.

use arrayvec::ArrayVec;

use crate::types::{
    BACK_TO_BACK_BONUS, GOAL_INCREMENT_STEP, HARD_DROP_POINTS_PER_ROW, INITIAL_GOAL,
    INITIAL_GOAL_INCREMENT, LINE_CLEAR_POINTS, SOFT_DROP_POINTS,
};

/// Messages produced by a single clear (clear name, combo note, level-up).
pub type ClearMessages = ArrayVec<&'static str, 3>;

/// A clear count outside 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot clear {lines} lines at once")]
pub struct InvalidLineCount {
    pub lines: u32,
}

/// Display name of a clear.
pub fn clear_message(lines: u32) -> Option<&'static str> {
    match lines {
        1 => Some("Single clear"),
        2 => Some("Double Clear!"),
        3 => Some("TRIPLE Clear!!"),
        4 => Some("TETRIS!!11"),
        _ => None,
    }
}

/// Gravity interval for a level, in milliseconds per row.
///
/// `(0.8 - (level - 1) * 0.007) ^ (level - 1)` seconds. Never below 1ms.
pub fn fall_interval_ms(level: u32) -> u32 {
    let n = level.saturating_sub(1) as f64;
    let seconds = (0.8 - n * 0.007).max(0.0).powf(n);
    ((seconds * 1000.0).round() as u32).max(1)
}

/// Cumulative score state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    score: u32,
    /// Points earned from line clears only (basis for the level goal)
    line_clear_points: u32,
    /// Rows physically removed from the matrix
    rows_cleared: u32,
    level: u32,
    goal: u32,
    goal_increment: u32,
    tetrises: u32,
    combos: u32,
    /// The last clear was a Tetris
    back_to_back: bool,
}

impl Scoring {
    pub fn new() -> Self {
        Self {
            score: 0,
            line_clear_points: 0,
            rows_cleared: 0,
            level: 1,
            goal: INITIAL_GOAL,
            goal_increment: INITIAL_GOAL_INCREMENT,
            tetrises: 0,
            combos: 0,
            back_to_back: false,
        }
    }

    /// Score a clear of `lines` rows and return the messages to show.
    pub fn cleared(&mut self, lines: u32) -> Result<ClearMessages, InvalidLineCount> {
        let name = clear_message(lines).ok_or(InvalidLineCount { lines })?;
        let was_back_to_back = self.back_to_back;

        let mut points = LINE_CLEAR_POINTS[lines as usize];
        if lines == 4 {
            self.tetrises += 1;
            if self.back_to_back {
                points += BACK_TO_BACK_BONUS;
                self.combos += 1;
            }
            self.back_to_back = true;
        } else {
            self.back_to_back = false;
        }

        self.score += points;
        self.line_clear_points += points;
        self.rows_cleared += lines;

        let mut messages = ClearMessages::new();
        messages.push(name);
        if was_back_to_back {
            messages.push(if self.back_to_back {
                "Combo!"
            } else {
                "C-C-Combo breaker!"
            });
        }
        if self.update_level() {
            messages.push("Next Level!");
        }
        Ok(messages)
    }

    /// Level up as many times as the cleared lines allow.
    fn update_level(&mut self) -> bool {
        let mut leveled = false;
        while self.lines_cleared() >= self.goal {
            self.level += 1;
            self.goal += self.goal_increment;
            self.goal_increment += GOAL_INCREMENT_STEP;
            leveled = true;
        }
        if leveled {
            log::debug!("level {} (next goal {})", self.level, self.goal);
        }
        leveled
    }

    /// One row of soft drop.
    pub fn soft_drop(&mut self) {
        self.score += SOFT_DROP_POINTS;
    }

    /// A hard drop over `rows` rows.
    pub fn hard_drop(&mut self, rows: u32) {
        self.score += rows * HARD_DROP_POINTS_PER_ROW;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lines in units of 100 line-clear points (a Tetris counts as 8).
    pub fn lines_cleared(&self) -> u32 {
        self.line_clear_points / 100
    }

    /// Rows physically removed from the matrix.
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn tetrises(&self) -> u32 {
        self.tetrises
    }

    /// Back-to-back Tetrises scored.
    pub fn combos(&self) -> u32 {
        self.combos
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new()
    }
}
