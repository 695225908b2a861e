//! Game state module - the phase machine driving one session
//!
//! Each call to [`GameState::tick`] advances the current [`Phase`] once:
//!
//! - **Generation**: take the next shape from the queue and put it in play
//! - **Falling**: apply input, then gravity, then fall through to the lock check
//! - **Lock**: a landed piece runs down its placement lock and may still move
//! - **Pattern**: remove full rows and score them
//!
//! A `LockOut` or `BlockOut` ends the session. After that every tick returns
//! the same error and nothing changes any more.

use crate::board::Board;
use crate::error::{BlockOut, GameOver};
use crate::events::GameEvent;
use crate::piece::Piece;
use crate::placement_lock::PlacementLock;
use crate::rng::Randomizer;
use crate::rules::Rules;
use crate::scoring::{fall_interval_ms, ClearMessages, Scoring};
use crate::timer::IntervalTimer;
use crate::types::{PieceKind, TickInput, BOARD_COLUMNS, VISIBLE_ROWS};

/// Phase of the engine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Generation,
    Falling,
    Lock,
    Pattern,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generation => "generation",
            Phase::Falling => "falling",
            Phase::Lock => "lock",
            Phase::Pattern => "pattern",
        }
    }
}

/// Clear messages currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Flash {
    messages: ClearMessages,
    remaining_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rules: Rules,
    board: Board,
    randomizer: Randomizer,
    active: Option<Piece>,
    ghost: Option<Piece>,
    hold: Option<Piece>,
    held_this_piece: bool,
    placement_lock: PlacementLock,
    scoring: Scoring,
    fall_timer: IntervalTimer,
    /// Gravity interval for the current level
    fall_interval_ms: u32,
    phase: Phase,
    game_over: Option<GameOver>,
    game_time_ms: u64,
    flash: Option<Flash>,
    events: Vec<GameEvent>,
    /// One-shot commands that arrived while no piece could take them
    pending_input: TickInput,
    input_handled: bool,
}

impl GameState {
    /// Create a new session with the default rules
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        let rules = rules.sanitized();
        let fall_interval_ms = fall_interval_ms(1);
        Self {
            rules,
            board: Board::new(),
            randomizer: Randomizer::new(seed, rules.next_queue_length),
            active: None,
            ghost: None,
            hold: None,
            held_this_piece: false,
            placement_lock: PlacementLock::with_allotment(
                rules.lock_allowed_moves,
                rules.lock_allowed_time_ms,
            ),
            scoring: Scoring::new(),
            fall_timer: IntervalTimer::new(fall_interval_ms),
            fall_interval_ms,
            phase: Phase::Generation,
            game_over: None,
            game_time_ms: 0,
            flash: None,
            events: Vec::new(),
            pending_input: TickInput::default(),
            input_handled: false,
        }
    }

    /// Throw the session away and start over with the same rules.
    pub fn restart(&mut self, seed: u32) {
        log::info!("restarting session (seed {})", seed);
        *self = Self::with_rules(seed, self.rules);
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Why the session ended, if it has.
    pub fn game_over(&self) -> Option<GameOver> {
        self.game_over
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn ghost(&self) -> Option<&Piece> {
        self.ghost.as_ref()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.as_ref().map(Piece::kind)
    }

    /// Hold is available for the piece in play.
    pub fn can_hold(&self) -> bool {
        !self.held_this_piece
    }

    /// Upcoming shapes, next first.
    pub fn next_queue(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.randomizer.preview()
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.scoring.lines_cleared()
    }

    pub fn placement_lock(&self) -> &PlacementLock {
        &self.placement_lock
    }

    /// Gravity interval of the current level.
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Interval the fall timer currently runs at (shorter while soft dropping).
    pub fn current_fall_interval_ms(&self) -> u32 {
        self.fall_timer.interval_ms()
    }

    /// Elapsed play time of the session.
    pub fn game_time_ms(&self) -> u64 {
        self.game_time_ms
    }

    /// Messages of the last clear while they are still shown.
    pub fn flash_messages(&self) -> &[&'static str] {
        match &self.flash {
            Some(flash) => flash.messages.as_slice(),
            None => &[],
        }
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Advance the session by `elapsed_ms`.
    ///
    /// One-shot commands given on a tick where no piece takes input (line
    /// clears, spawning, locking) are kept and applied on the next tick that
    /// does.
    pub fn tick(&mut self, elapsed_ms: u32, input: &TickInput) -> Result<(), GameOver> {
        if let Some(reason) = self.game_over {
            return Err(reason);
        }

        self.game_time_ms += u64::from(elapsed_ms);
        self.fall_timer.update(elapsed_ms);

        let input = input.with_pending(&self.pending_input);
        self.input_handled = false;
        let next = match self.phase {
            Phase::Generation => self.generation_phase(&input),
            Phase::Falling => self.falling_phase(elapsed_ms, &input),
            Phase::Lock => self.lock_phase(elapsed_ms, &input, true),
            Phase::Pattern => Ok(self.pattern_phase()),
        };
        self.pending_input = if self.input_handled {
            TickInput::default()
        } else {
            input.one_shots()
        };
        self.update_flash(elapsed_ms);

        match next {
            Ok(phase) => {
                if phase != self.phase {
                    log::debug!("phase {} -> {}", self.phase.as_str(), phase.as_str());
                }
                self.phase = phase;
                Ok(())
            }
            Err(reason) => {
                log::info!(
                    "game over ({}): score {}, level {}, {} lines",
                    reason,
                    self.scoring.score(),
                    self.scoring.level(),
                    self.scoring.lines_cleared()
                );
                self.game_over = Some(reason);
                self.events.push(GameEvent::GameOver(reason));
                Err(reason)
            }
        }
    }

    fn generation_phase(&mut self, input: &TickInput) -> Result<Phase, GameOver> {
        let kind = self.randomizer.draw();
        self.spawn(Piece::new(kind), false, input.soft_drop_held)?;
        Ok(Phase::Falling)
    }

    fn falling_phase(&mut self, elapsed_ms: u32, input: &TickInput) -> Result<Phase, GameOver> {
        if let Some(next) = self.handle_input(input, false)? {
            return Ok(next);
        }
        if self.fall_timer.is_firing() {
            self.fall_now(input.soft_drop_held);
        }
        self.lock_phase(elapsed_ms, input, false)
    }

    fn lock_phase(
        &mut self,
        elapsed_ms: u32,
        input: &TickInput,
        handle_inputs: bool,
    ) -> Result<Phase, GameOver> {
        let Some(active) = self.active else {
            debug_assert!(false, "lock phase without a piece in play");
            log::warn!("lock phase without a piece in play, generating a new one");
            return Ok(Phase::Generation);
        };

        if !active.is_landed(&self.board) {
            return Ok(Phase::Falling);
        }

        self.placement_lock.time_passed(elapsed_ms);
        self.placement_lock.landed(active.bounds().min_row);
        if self.placement_lock.should_lock() {
            self.lock_active()?;
            return Ok(Phase::Pattern);
        }

        if handle_inputs {
            return Ok(self.handle_input(input, true)?.unwrap_or(Phase::Lock));
        }
        Ok(Phase::Lock)
    }

    fn pattern_phase(&mut self) -> Phase {
        let mut cleared = 0;
        for row in 1..=self.board.rows() as i8 {
            while self.board.is_row_filled(row) {
                self.board.clear_row(row);
                self.board.shift_down(row + 1);
                cleared += 1;
            }
        }

        if cleared > 0 {
            match self.scoring.cleared(cleared) {
                Ok(messages) => {
                    self.flash = Some(Flash {
                        messages: messages.clone(),
                        remaining_ms: self.rules.flash_ms,
                    });
                    self.events.push(GameEvent::RowsCleared {
                        count: cleared,
                        messages,
                    });
                    self.update_fall_speed();
                }
                Err(err) => {
                    debug_assert!(false, "{}", err);
                    log::warn!("{}", err);
                }
            }
        }
        Phase::Generation
    }

    /// Apply one tick of player input to the piece in play.
    ///
    /// Returns the phase to jump to when a hold or hard drop ended the
    /// current phase early. Moves and rotations only count against the
    /// placement lock when `notify_lock` is set.
    fn handle_input(
        &mut self,
        input: &TickInput,
        notify_lock: bool,
    ) -> Result<Option<Phase>, GameOver> {
        self.input_handled = true;
        if self.apply_movement(input.movement.signum()) {
            if notify_lock {
                self.placement_lock.moved();
            }
            self.update_ghost();
        }

        self.apply_soft_drop_speed(input.soft_drop_held);
        if input.soft_drop_step {
            self.soft_drop_step();
        }

        if let Some(direction) = input.rotate {
            let rotated = match self.active.as_mut() {
                Some(active) => active.rotate(&self.board, direction),
                None => false,
            };
            if rotated {
                if notify_lock {
                    self.placement_lock.rotated();
                }
                self.update_ghost();
                self.piece_moved();
            }
        }

        if input.hold && self.hold_active(input.soft_drop_held)? {
            self.fall_timer.reset();
            return Ok(Some(Phase::Falling));
        }

        if input.hard_drop && self.hard_drop()? {
            return Ok(Some(Phase::Pattern));
        }

        Ok(None)
    }

    fn apply_movement(&mut self, dx: i8) -> bool {
        if dx == 0 {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.can_move_by(&self.board, dx, 0) {
            return false;
        }
        active.move_by(dx, 0);
        self.piece_moved();
        true
    }

    fn apply_soft_drop_speed(&mut self, held: bool) {
        if held {
            let interval = (self.fall_interval_ms / self.rules.soft_drop_divisor).max(1);
            self.fall_timer.set_interval(interval, true);
        } else {
            self.fall_timer.set_interval(self.fall_interval_ms, false);
        }
    }

    /// One row down for a drag gesture, scored like a soft drop.
    fn soft_drop_step(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.is_landed(&self.board) {
            return;
        }
        active.move_by(0, -1);
        self.scoring.soft_drop();
        self.piece_moved();
    }

    /// Gravity step. Soft drop points are awarded while the soft drop is held.
    fn fall_now(&mut self, soft_drop_held: bool) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.is_landed(&self.board) {
            return;
        }
        active.move_by(0, -1);
        if soft_drop_held {
            self.scoring.soft_drop();
        }
        self.piece_moved();
    }

    fn hard_drop(&mut self) -> Result<bool, GameOver> {
        let Some(active) = self.active.as_mut() else {
            return Ok(false);
        };
        let rows = active.drop_to_floor(&self.board);
        if rows > 0 {
            self.piece_moved();
        }
        self.lock_active()?;
        self.scoring.hard_drop(rows);
        Ok(true)
    }

    /// Put the piece in play into the hold slot.
    ///
    /// The previously held piece (or else the next shape from the queue) comes
    /// into play through the regular spawn placement. Allowed once per piece.
    fn hold_active(&mut self, soft_drop_held: bool) -> Result<bool, GameOver> {
        if self.held_this_piece {
            return Ok(false);
        }
        let Some(mut to_hold) = self.active.take() else {
            return Ok(false);
        };

        self.placement_lock.locked();
        match self.hold.take() {
            Some(held) => self.spawn(held, true, soft_drop_held)?,
            None => {
                let kind = self.randomizer.draw();
                self.spawn(Piece::new(kind), false, soft_drop_held)?;
            }
        }

        to_hold.reset_rotation();
        log::debug!("holding {}", to_hold.kind().as_str());
        self.events.push(GameEvent::Held {
            kind: to_hold.kind(),
        });
        self.hold = Some(to_hold);
        self.held_this_piece = true;
        Ok(true)
    }

    /// Place a piece at the top of the visible matrix and let it take its first step.
    fn spawn(
        &mut self,
        mut piece: Piece,
        from_hold: bool,
        soft_drop_held: bool,
    ) -> Result<(), GameOver> {
        let bounds = piece.bounds();
        // ceil((columns - width) / 2)
        let column = (BOARD_COLUMNS as i8 - bounds.width() + 1) / 2;
        piece.move_bottom_left_to(column, VISIBLE_ROWS as i8 + 1);

        let kind = piece.kind();
        self.active = Some(piece);
        if !piece.is_valid(&self.board) {
            return Err(BlockOut { kind }.into());
        }

        self.events.push(GameEvent::Spawned { kind, from_hold });
        self.ghost = Some(piece.fresh());
        self.update_ghost();

        self.fall_timer.reset();
        self.fall_now(soft_drop_held);
        Ok(())
    }

    fn lock_active(&mut self) -> Result<(), GameOver> {
        let Some(mut piece) = self.active.take() else {
            return Ok(());
        };
        if let Err(lock_out) = self.board.lock(&mut piece) {
            self.active = Some(piece);
            return Err(lock_out.into());
        }

        self.events.push(GameEvent::PieceLocked {
            kind: piece.kind(),
            cells: *piece.cells(),
        });
        self.placement_lock.locked();
        self.held_this_piece = false;
        self.ghost = None;
        Ok(())
    }

    /// Align the ghost with the piece in play and drop it to the floor.
    fn update_ghost(&mut self) {
        if let (Some(ghost), Some(active)) = (self.ghost.as_mut(), self.active.as_ref()) {
            ghost.sync_with(active);
            ghost.drop_to_floor(&self.board);
        }
    }

    fn piece_moved(&mut self) {
        if let Some(active) = &self.active {
            self.events.push(GameEvent::PieceMoved {
                kind: active.kind(),
                cells: *active.cells(),
            });
        }
    }

    fn update_fall_speed(&mut self) {
        self.fall_interval_ms = fall_interval_ms(self.scoring.level());
    }

    fn update_flash(&mut self, elapsed_ms: u32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
            if flash.remaining_ms == 0 {
                self.flash = None;
            }
        }
    }

    /// Put a piece in play directly, skipping the spawn placement.
    #[cfg(test)]
    pub(crate) fn place_active(&mut self, piece: Piece) {
        self.active = Some(piece);
        self.ghost = Some(piece.fresh());
        self.update_ghost();
        self.phase = Phase::Falling;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
