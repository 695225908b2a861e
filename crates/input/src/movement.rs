//! Horizontal movement timing (directional priority + DAS/ARR).
//!
//! Two small machines are composed here:
//!
//! - [`HeldDirections`] remembers which of left/right are held and in which
//!   order, so the most recently pressed direction wins and releasing it falls
//!   back to the other one.
//! - [`ShiftTiming`] turns the held direction into movement pulses: one on
//!   every edge, one when the delayed auto shift expires, then one per auto
//!   repeat interval.

use crate::types::{AUTO_REPEAT_MS, DELAYED_AUTO_SHIFT_MS};

/// Left/right key edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionEdge {
    LeftDown,
    RightDown,
    LeftUp,
    RightUp,
}

/// Which directions are held, and in which order they were pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeldDirections {
    #[default]
    None,
    Left,
    Right,
    /// Left was pressed first, right is winning
    LeftThenRight,
    /// Right was pressed first, left is winning
    RightThenLeft,
}

/// An edge that makes no sense in the current state (e.g. releasing a key
/// that is not held).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid movement transition from {from:?} via {edge:?}")]
pub struct InvalidTransition {
    pub from: HeldDirections,
    pub edge: DirectionEdge,
}

impl HeldDirections {
    pub fn transition(self, edge: DirectionEdge) -> Result<Self, InvalidTransition> {
        use DirectionEdge::*;
        use HeldDirections as H;

        let next = match (self, edge) {
            (H::None, LeftDown) => H::Left,
            (H::None, RightDown) => H::Right,
            (H::Left, RightDown) => H::LeftThenRight,
            (H::Left, LeftUp) => H::None,
            (H::Right, LeftDown) => H::RightThenLeft,
            (H::Right, RightUp) => H::None,
            (H::LeftThenRight | H::RightThenLeft, LeftUp) => H::Right,
            (H::LeftThenRight | H::RightThenLeft, RightUp) => H::Left,
            (from, edge) => return Err(InvalidTransition { from, edge }),
        };
        Ok(next)
    }

    /// Column offset this state moves towards.
    pub fn movement(self) -> i8 {
        match self {
            HeldDirections::Left | HeldDirections::RightThenLeft => -1,
            HeldDirections::Right | HeldDirections::LeftThenRight => 1,
            HeldDirections::None => 0,
        }
    }
}

/// Auto shift progress of the held direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftTiming {
    #[default]
    Idle,
    DelayedAutoShift {
        held: HeldDirections,
        since_start_ms: u32,
    },
    AutoRepeat {
        held: HeldDirections,
        since_repeat_ms: u32,
    },
}

/// Directional priority plus DAS/ARR timing for one input session.
#[derive(Debug, Clone)]
pub struct MovementMachine {
    held: HeldDirections,
    timing: ShiftTiming,
    das_ms: u32,
    arr_ms: u32,
}

impl MovementMachine {
    pub fn new() -> Self {
        Self::with_timing(DELAYED_AUTO_SHIFT_MS, AUTO_REPEAT_MS)
    }

    pub fn with_timing(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            held: HeldDirections::None,
            timing: ShiftTiming::Idle,
            das_ms,
            arr_ms: arr_ms.max(1),
        }
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    pub fn timing(&self) -> ShiftTiming {
        self.timing
    }

    /// Apply one key edge and return the immediate pulse.
    ///
    /// On error the machine is left unchanged.
    pub fn edge(&mut self, edge: DirectionEdge) -> Result<i8, InvalidTransition> {
        self.held = self.held.transition(edge)?;
        self.timing = ShiftTiming::DelayedAutoShift {
            held: self.held,
            since_start_ms: 0,
        };
        Ok(self.held.movement())
    }

    /// Advance the auto shift timers and return the pulse they produce.
    pub fn time_passed(&mut self, elapsed_ms: u32) -> i8 {
        match &mut self.timing {
            ShiftTiming::Idle => 0,
            ShiftTiming::DelayedAutoShift {
                held,
                since_start_ms,
            } => {
                *since_start_ms += elapsed_ms;
                if *since_start_ms >= self.das_ms {
                    let held = *held;
                    self.timing = ShiftTiming::AutoRepeat {
                        held,
                        since_repeat_ms: 0,
                    };
                    held.movement()
                } else {
                    0
                }
            }
            ShiftTiming::AutoRepeat {
                held,
                since_repeat_ms,
            } => {
                *since_repeat_ms += elapsed_ms;
                if *since_repeat_ms >= self.arr_ms {
                    *since_repeat_ms = 0;
                    held.movement()
                } else {
                    0
                }
            }
        }
    }

    /// One tick: the edges in the order they happened, then the timers. The
    /// last non-zero edge pulse wins, and any edge pulse wins over a timer
    /// pulse.
    pub fn update(
        &mut self,
        edges: &[DirectionEdge],
        elapsed_ms: u32,
    ) -> Result<i8, InvalidTransition> {
        let mut movement = 0;
        for &edge in edges {
            let pulse = self.edge(edge)?;
            if pulse != 0 {
                movement = pulse;
            }
        }

        let timed = self.time_passed(elapsed_ms);
        if movement == 0 {
            movement = timed;
        }
        Ok(movement)
    }

    pub fn reset(&mut self) {
        self.held = HeldDirections::None;
        self.timing = ShiftTiming::Idle;
    }
}

impl Default for MovementMachine {
    fn default() -> Self {
        Self::new()
    }
}
