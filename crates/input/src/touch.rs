//! Pointer gestures (drag, swipe, tap) mapped onto game commands.
//!
//! Coordinates are in layout units with `y` growing downward. One matrix cell
//! is `cell_size` units wide and tall; the terminal frontend feeds mouse cells
//! converted to that scale.

use crate::types::{Command, HARD_DROP_SWIPE_CELLS_PER_SEC, TAP_MAX_MS};

/// Axis-aligned rectangle, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Where things are on screen, as far as gestures care.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    pub cell_size: f32,
    pub matrix: Rect,
    pub hold: Rect,
}

/// Pointer state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    /// The pointer was released since the previous sample
    pub just_up: bool,
    /// Time since the pointer went down
    pub duration_ms: u32,
    /// Instantaneous speed in layout units per second
    pub speed: f32,
}

/// Builds [`PointerSample`]s from raw press/drag/release events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    x: f32,
    y: f32,
    down: bool,
    just_up: bool,
    duration_ms: u32,
    last_sampled: (f32, f32),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.down = true;
        self.duration_ms = 0;
        self.last_sampled = (x, y);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.move_to(x, y);
        if self.down {
            self.down = false;
            self.just_up = true;
        }
    }

    /// Sample the pointer after `elapsed_ms` and clear the release edge.
    pub fn sample(&mut self, elapsed_ms: u32) -> PointerSample {
        if self.down {
            self.duration_ms = self.duration_ms.saturating_add(elapsed_ms);
        }
        let (px, py) = self.last_sampled;
        let distance = ((self.x - px).powi(2) + (self.y - py).powi(2)).sqrt();
        let speed = if elapsed_ms == 0 {
            0.0
        } else {
            distance * 1000.0 / elapsed_ms as f32
        };
        self.last_sampled = (self.x, self.y);

        let sample = PointerSample {
            x: self.x,
            y: self.y,
            down: self.down,
            just_up: self.just_up,
            duration_ms: self.duration_ms,
            speed,
        };
        self.just_up = false;
        sample
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchState {
    /// Waiting for a press. After a gesture acted, the pointer must be
    /// released before a new gesture can start.
    Idle { acted: bool },
    /// Pointer is down; movement is measured from the last consumed point.
    Drag {
        last_x: f32,
        last_y: f32,
        acted: bool,
    },
}

impl Default for TouchState {
    fn default() -> Self {
        TouchState::Idle { acted: false }
    }
}

/// Gesture recognizer emitting at most one command per tick.
#[derive(Debug, Clone)]
pub struct TouchMachine {
    state: TouchState,
    layout: TouchLayout,
    /// Cells per second a downward swipe needs to count as a hard drop
    hard_drop_cells_per_sec: f32,
    tap_max_ms: u32,
}

impl TouchMachine {
    pub fn new(layout: TouchLayout) -> Self {
        Self {
            state: TouchState::default(),
            layout,
            hard_drop_cells_per_sec: HARD_DROP_SWIPE_CELLS_PER_SEC,
            tap_max_ms: TAP_MAX_MS,
        }
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn layout(&self) -> &TouchLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: TouchLayout) {
        self.layout = layout;
    }

    pub fn update(&mut self, pointer: &PointerSample) -> Option<Command> {
        let cell = self.layout.cell_size;
        let (next, command) = match self.state {
            TouchState::Idle { acted: false } if pointer.down => (
                TouchState::Drag {
                    last_x: pointer.x,
                    last_y: pointer.y,
                    acted: false,
                },
                None,
            ),
            TouchState::Idle { acted: true } if !pointer.down => {
                (TouchState::Idle { acted: false }, None)
            }
            TouchState::Idle { .. } => (self.state, None),

            TouchState::Drag {
                last_x,
                last_y,
                acted,
            } => {
                let consumed = TouchState::Drag {
                    last_x: pointer.x,
                    last_y: pointer.y,
                    acted: true,
                };
                let dx = pointer.x - last_x;
                let dy = pointer.y - last_y;
                if dx < -cell {
                    (consumed, Some(Command::Left))
                } else if dx > cell {
                    (consumed, Some(Command::Right))
                } else if dy > cell {
                    if pointer.speed >= cell * self.hard_drop_cells_per_sec {
                        (TouchState::Idle { acted: true }, Some(Command::HardDrop))
                    } else {
                        (consumed, Some(Command::SoftDrop))
                    }
                } else if pointer.just_up {
                    let tap = (!acted && pointer.duration_ms <= self.tap_max_ms)
                        .then(|| self.tap_command(pointer.x, pointer.y));
                    (TouchState::Idle { acted }, tap)
                } else {
                    (self.state, None)
                }
            }
        };

        if let Some(command) = command {
            log::trace!("touch gesture: {}", command.as_str());
        }
        self.state = next;
        command
    }

    fn tap_command(&self, x: f32, y: f32) -> Command {
        if self.layout.hold.contains(x, y) {
            return Command::Hold;
        }
        let matrix = &self.layout.matrix;
        if x < matrix.left + (matrix.right - matrix.left) / 2.0 {
            Command::RotateCcw
        } else {
            Command::RotateCw
        }
    }

    pub fn reset(&mut self) {
        self.state = TouchState::default();
    }
}
