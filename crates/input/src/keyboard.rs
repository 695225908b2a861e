//! Held / just-pressed / just-released tracking per command.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a held command that has not been seen for a while counts as released. As
//! soon as the terminal reports a real release, the timeout is switched off.

use crate::types::Command;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct KeyState {
    held: bool,
    just_down: bool,
    just_up: bool,
    /// Held when the tick started
    was_held: bool,
    /// Time since the last press or repeat event while held
    since_seen_ms: u32,
}

#[derive(Debug, Clone)]
pub struct KeyboardState {
    keys: [KeyState; Command::ALL.len()],
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            keys: [KeyState::default(); Command::ALL.len()],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// The terminal reported at least one real key release.
    pub fn release_events_seen(&self) -> bool {
        self.release_events_seen
    }

    /// Key press or auto-repeat event. Only the first one is an edge.
    pub fn press(&mut self, command: Command) {
        let key = &mut self.keys[command.index()];
        key.since_seen_ms = 0;
        if !key.held {
            key.held = true;
            key.just_down = true;
        }
    }

    /// Key release event from the terminal.
    pub fn release(&mut self, command: Command) {
        self.release_events_seen = true;
        Self::release_key(&mut self.keys[command.index()]);
    }

    fn release_key(key: &mut KeyState) {
        if key.held {
            key.held = false;
            key.just_up = true;
        }
    }

    pub fn is_down(&self, command: Command) -> bool {
        self.keys[command.index()].held
    }

    pub fn just_down(&self, command: Command) -> bool {
        self.keys[command.index()].just_down
    }

    pub fn just_up(&self, command: Command) -> bool {
        self.keys[command.index()].just_up
    }

    /// The command was held when the current tick started.
    pub fn was_down(&self, command: Command) -> bool {
        self.keys[command.index()].was_held
    }

    /// How many times the command flipped between up and down this tick.
    ///
    /// Starting from [`was_down`](Self::was_down), the flips alternate, so a
    /// press, release and press of a free key inside one tick counts 3.
    pub fn transitions(&self, command: Command) -> usize {
        let key = &self.keys[command.index()];
        let any = key.just_down || key.just_up;
        match (key.was_held == key.held, key.just_down && key.just_up) {
            (true, _) if any => 2,
            (true, _) => 0,
            (false, true) => 3,
            (false, false) => 1,
        }
    }

    /// Close the tick: edges are consumed, stale keys auto-release (the
    /// release shows up as an edge on the next tick).
    pub fn end_tick(&mut self, elapsed_ms: u32) {
        let auto_release = !self.release_events_seen;
        for key in &mut self.keys {
            key.just_down = false;
            key.just_up = false;
            key.was_held = key.held;
            if key.held {
                key.since_seen_ms = key.since_seen_ms.saturating_add(elapsed_ms);
                if auto_release && key.since_seen_ms > self.key_release_timeout_ms {
                    Self::release_key(key);
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.keys = [KeyState::default(); Command::ALL.len()];
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}
