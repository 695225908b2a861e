//! Controls: terminal events in, one [`TickInput`] per tick out.
//!
//! Composes the keyboard tracker, the left/right movement machine and the
//! pointer gesture recognizer. Keyboard and pointer share the same command
//! vocabulary; when both produce a horizontal move in the same tick, the
//! keyboard wins.

use arrayvec::ArrayVec;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::keyboard::KeyboardState;
use crate::map::{map_key, Binding, SessionAction};
use crate::movement::{DirectionEdge, MovementMachine};
use crate::touch::{PointerTracker, TouchLayout, TouchMachine};
use crate::types::{Command, TickInput};

/// Terminal columns and rows per layout unit (a matrix cell is drawn two
/// columns wide and one row tall).
pub const DEFAULT_POINTER_SCALE: (f32, f32) = (2.0, 1.0);

#[derive(Debug, Clone)]
pub struct Controls {
    keyboard: KeyboardState,
    movement: MovementMachine,
    pointer: PointerTracker,
    touch: TouchMachine,
    pointer_scale: (f32, f32),
}

impl Controls {
    pub fn new(das_ms: u32, arr_ms: u32, layout: TouchLayout) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            movement: MovementMachine::with_timing(das_ms, arr_ms),
            pointer: PointerTracker::new(),
            touch: TouchMachine::new(layout),
            pointer_scale: DEFAULT_POINTER_SCALE,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.keyboard = self.keyboard.with_key_release_timeout_ms(timeout_ms);
        self
    }

    pub fn with_pointer_scale(mut self, columns: f32, rows: f32) -> Self {
        self.pointer_scale = (columns.max(1.0), rows.max(1.0));
        self
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn movement(&self) -> &MovementMachine {
        &self.movement
    }

    pub fn touch(&self) -> &TouchMachine {
        &self.touch
    }

    /// The matrix moved on screen (terminal resize).
    pub fn set_touch_layout(&mut self, layout: TouchLayout) {
        self.touch.set_layout(layout);
    }

    /// Feed one terminal event. Session keys are returned to the caller,
    /// game keys are recorded for the next [`Controls::tick`].
    pub fn handle_event(&mut self, event: &Event) -> Option<SessionAction> {
        match event {
            Event::Key(key) => match map_key(*key)? {
                Binding::Session(action) => (key.kind == KeyEventKind::Press).then_some(action),
                Binding::Game(command) => {
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => self.keyboard.press(command),
                        KeyEventKind::Release => self.keyboard.release(command),
                    }
                    None
                }
            },
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let x = f32::from(mouse.column) / self.pointer_scale.0;
        let y = f32::from(mouse.row) / self.pointer_scale.1;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer.press(x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer.move_to(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.pointer.release(x, y),
            _ => {}
        }
    }

    /// Close one tick of `elapsed_ms` and produce the game input for it.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickInput {
        let keys = &self.keyboard;

        let mut edges = ArrayVec::<DirectionEdge, 6>::new();
        for (command, down, up) in [
            (Command::Left, DirectionEdge::LeftDown, DirectionEdge::LeftUp),
            (Command::Right, DirectionEdge::RightDown, DirectionEdge::RightUp),
        ] {
            let mut held = keys.was_down(command);
            for _ in 0..keys.transitions(command) {
                held = !held;
                edges.push(if held { down } else { up });
            }
        }

        let movement = match self.movement.update(&edges, elapsed_ms) {
            Ok(movement) => movement,
            Err(err) => {
                log::warn!("{err}, resetting movement");
                self.movement.reset();
                0
            }
        };

        let mut input = TickInput {
            movement,
            soft_drop_held: keys.is_down(Command::SoftDrop),
            hard_drop: keys.just_down(Command::HardDrop),
            hold: keys.just_down(Command::Hold),
            ..TickInput::default()
        };
        for rotation in [Command::RotateCw, Command::RotateCcw] {
            if keys.just_down(rotation) {
                input.push(rotation);
            }
        }

        let pointer = self.pointer.sample(elapsed_ms);
        if let Some(command) = self.touch.update(&pointer) {
            let horizontal = matches!(command, Command::Left | Command::Right);
            if !(horizontal && input.movement != 0) {
                input.push(command);
            }
        }

        self.keyboard.end_tick(elapsed_ms);
        input
    }

    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.movement.reset();
        self.pointer.reset();
        self.touch.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::HeldDirections;
    use crate::touch::Rect;
    use crate::types::RotationDirection;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn layout() -> TouchLayout {
        TouchLayout {
            cell_size: 1.0,
            matrix: Rect {
                left: 10.0,
                top: 1.0,
                right: 20.0,
                bottom: 21.0,
            },
            hold: Rect {
                left: 0.0,
                top: 1.0,
                right: 5.0,
                bottom: 4.0,
            },
        }
    }

    fn controls() -> Controls {
        Controls::new(300, 20, layout())
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_tap_left_moves_once() {
        let mut controls = controls();
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Release));
        assert_eq!(controls.tick(16).movement, -1);
        assert_eq!(controls.tick(16).movement, 0);
        assert_eq!(controls.tick(1000).movement, 0);
    }

    #[test]
    fn test_press_release_press_in_one_tick_stays_held() {
        let mut controls = controls();
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Release));
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        assert_eq!(controls.tick(16).movement, -1);
        assert_eq!(controls.movement().held(), HeldDirections::Left);

        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Release));
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        controls.tick(16);
        assert_eq!(controls.movement().held(), HeldDirections::Left);

        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Release));
        assert_eq!(controls.tick(16).movement, 0);
        assert_eq!(controls.movement().held(), HeldDirections::None);
    }

    #[test]
    fn test_held_keys_become_levels_and_edges() {
        let mut controls = controls();
        controls.handle_event(&key(KeyCode::Down, KeyEventKind::Press));
        controls.handle_event(&key(KeyCode::Up, KeyEventKind::Press));
        controls.handle_event(&key(KeyCode::Char('z'), KeyEventKind::Press));

        let input = controls.tick(16);
        assert!(input.soft_drop_held);
        assert_eq!(input.rotate, Some(RotationDirection::Clockwise));

        // terminal repeat: still held, no second rotation
        controls.handle_event(&key(KeyCode::Up, KeyEventKind::Repeat));
        let input = controls.tick(16);
        assert!(input.soft_drop_held);
        assert_eq!(input.rotate, None);

        controls.handle_event(&key(KeyCode::Down, KeyEventKind::Release));
        assert!(!controls.tick(16).soft_drop_held);
    }

    #[test]
    fn test_session_keys_are_returned() {
        let mut controls = controls();
        assert_eq!(
            controls.handle_event(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(SessionAction::Pause)
        );
        assert_eq!(
            controls.handle_event(&key(KeyCode::Esc, KeyEventKind::Release)),
            None
        );
        assert_eq!(
            controls.handle_event(&key(KeyCode::Char(' '), KeyEventKind::Press)),
            None
        );
        assert!(controls.tick(16).hard_drop);
    }

    #[test]
    fn test_mouse_tap_in_hold_box_holds() {
        let mut controls = controls();
        // column 4 / 2 = 2.0, inside the hold rect
        controls.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert!(controls.tick(16).is_idle());
        controls.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 2));
        assert!(controls.tick(16).hold);
    }

    #[test]
    fn test_keyboard_movement_wins_over_drag() {
        let mut controls = controls();
        controls.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 30, 10));
        controls.tick(16);

        controls.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 36, 10));
        controls.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        assert_eq!(controls.tick(16).movement, -1);
    }
}
