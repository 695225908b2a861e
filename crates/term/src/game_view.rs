//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, left to right: hold box with the stats below it, matrix,
//! next queue. Only the 20 visible rows of the matrix are drawn, row 20 at the
//! top.

use crate::core::shapes::mask;
use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Coord, PieceKind, Rotation, BOARD_COLUMNS, VISIBLE_ROWS};

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const MATRIX_BG: Rgb = Rgb::new(30, 30, 40);
/// Width of the hold and next boxes in matrix cells.
const PREVIEW_CELLS: u16 = 4;
const GAP: u16 = 2;
const SIDE_PANEL_W: u16 = 18;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Area {
    pub fn right(&self) -> u16 {
        self.x + self.w
    }

    pub fn bottom(&self) -> u16 {
        self.y + self.h
    }
}

/// Where the view puts things for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    /// Inside of the hold box
    pub hold: Area,
    /// Inside of the matrix frame (the 20 visible rows)
    pub matrix: Area,
    /// Inside of the next queue box
    pub next: Area,
    /// Top-left corner of the stats block
    pub stats_x: u16,
    pub stats_y: u16,
}

/// Session state the snapshot does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlay {
    pub paused: bool,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Matrix cell width in terminal columns.
    cell_w: u16,
    /// Matrix cell height in terminal rows.
    cell_h: u16,
    /// Pieces shown from the next queue.
    next_shown: usize,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            next_shown: 6,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    pub fn cell_h(&self) -> u16 {
        self.cell_h
    }

    /// Smallest viewport that fits everything.
    pub fn min_viewport(&self) -> Viewport {
        let matrix_w = u16::from(BOARD_COLUMNS) * self.cell_w + 2;
        let matrix_h = u16::from(VISIBLE_ROWS) * self.cell_h + 2;
        Viewport::new(
            self.left_column_w() + GAP + matrix_w + GAP + self.preview_w() + 2,
            matrix_h,
        )
    }

    fn preview_w(&self) -> u16 {
        PREVIEW_CELLS * self.cell_w
    }

    /// Hold box with the stats below it.
    fn left_column_w(&self) -> u16 {
        (self.preview_w() + 2).max(SIDE_PANEL_W)
    }

    pub fn layout(&self, viewport: Viewport) -> ViewLayout {
        let min = self.min_viewport();
        let left = viewport.width.saturating_sub(min.width) / 2;
        let top = viewport.height.saturating_sub(min.height) / 2;

        let hold = Area {
            x: left + 1,
            y: top + 1,
            w: self.preview_w(),
            h: 2 * self.cell_h,
        };
        let matrix = Area {
            x: left + self.left_column_w() + GAP + 1,
            y: top + 1,
            w: u16::from(BOARD_COLUMNS) * self.cell_w,
            h: u16::from(VISIBLE_ROWS) * self.cell_h,
        };
        let next = Area {
            x: matrix.right() + 1 + GAP + 1,
            y: top + 1,
            w: self.preview_w(),
            h: self.next_shown as u16 * 3 * self.cell_h,
        };
        ViewLayout {
            hold,
            matrix,
            next,
            stats_x: left,
            stats_y: hold.bottom() + 2,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-light hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::new(' ', Style::new(Rgb::new(220, 220, 220), BACKGROUND)));

        let min = self.min_viewport();
        if viewport.width < min.width || viewport.height < min.height {
            let msg = format!("enlarge terminal to {}x{}", min.width, min.height);
            fb.put_str(0, 0, &msg, Style::default().bold());
            return;
        }

        let layout = self.layout(viewport);
        let border = Style::new(Rgb::new(200, 200, 200), BACKGROUND);
        let label = Style::new(Rgb::new(220, 220, 220), BACKGROUND).bold();

        self.draw_matrix(fb, snap, &layout, border);

        // Hold
        let hold = layout.hold;
        fb.draw_box(hold.x - 1, hold.y - 1, hold.w + 2, hold.h + 2, border);
        fb.put_str(hold.x, hold.y - 1, "HOLD", label);
        if let Some(kind) = snap.hold {
            self.draw_preview(fb, kind, hold.x, hold.y, !snap.can_hold);
        }

        // Next queue
        let next = layout.next;
        fb.draw_box(next.x - 1, next.y - 1, next.w + 2, next.h + 2, border);
        fb.put_str(next.x, next.y - 1, "NEXT", label);
        for (i, kind) in snap.next_queue.iter().take(self.next_shown).enumerate() {
            let y = next.y + (i as u16) * 3 * self.cell_h;
            self.draw_preview(fb, *kind, next.x, y, false);
        }

        self.draw_stats(fb, snap, layout.stats_x, layout.stats_y, viewport);
        self.draw_flash(fb, snap, &layout);

        if let Some(reason) = snap.game_over {
            self.draw_banner(fb, &layout, &["GAME OVER", reason.as_str(), "r: restart  q: quit"]);
        } else if overlay.paused {
            self.draw_banner(fb, &layout, &["PAUSED", "esc: resume"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_matrix(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &ViewLayout, border: Style) {
        let m = layout.matrix;
        fb.draw_box(m.x - 1, m.y - 1, m.w + 2, m.h + 2, border);

        let empty = Style::new(Rgb::new(90, 90, 100), MATRIX_BG).dim();
        for (index, row) in snap.board.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                let at = Coord::new(column as i8 + 1, index as i8 + 1);
                match cell {
                    Some(mino) => {
                        let mut fg = piece_color(mino.kind);
                        if mino.locked {
                            fg = fg.darker(70);
                        }
                        self.fill_matrix_cell(fb, m, at, '█', Style::new(fg, MATRIX_BG));
                    }
                    None => self.fill_matrix_cell(fb, m, at, '·', empty),
                }
            }
        }

        if let Some(ghost) = &snap.ghost {
            let style = Style::new(piece_color(ghost.kind).darker(60), MATRIX_BG).dim();
            self.draw_piece(fb, m, ghost, '░', style);
        }
        if let Some(active) = &snap.active {
            let style = Style::new(piece_color(active.kind), MATRIX_BG).bold();
            self.draw_piece(fb, m, active, '█', style);
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, matrix: Area, piece: &PieceSnapshot, ch: char, style: Style) {
        for &at in &piece.cells {
            self.fill_matrix_cell(fb, matrix, at, ch, style);
        }
    }

    /// Cells outside the visible rows are skipped.
    fn fill_matrix_cell(&self, fb: &mut FrameBuffer, matrix: Area, at: Coord, ch: char, style: Style) {
        let visible = 1..=VISIBLE_ROWS as i8;
        if !visible.contains(&at.row) || !(1..=BOARD_COLUMNS as i8).contains(&at.column) {
            return;
        }
        let x = matrix.x + (at.column as u16 - 1) * self.cell_w;
        let y = matrix.y + (VISIBLE_ROWS as u16 - at.row as u16) * self.cell_h;
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    /// A piece in spawn orientation, trimmed to its occupied rows.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16, dimmed: bool) {
        let offsets = mask(kind, Rotation::Spawn);
        let top = offsets.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let mut style = Style::new(piece_color(kind), BACKGROUND);
        if dimmed {
            style = Style::new(piece_color(kind).darker(40), BACKGROUND).dim();
        }
        for (dx, dy) in offsets {
            let px = x + dx as u16 * self.cell_w;
            let py = y + (dy - top) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_stats(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16, viewport: Viewport) {
        let label = Style::new(Rgb::new(160, 160, 170), BACKGROUND);
        let value = Style::new(Rgb::new(230, 230, 230), BACKGROUND).bold();

        let seconds = snap.game_time_ms / 1000;
        let rows = [
            ("SCORE", snap.score.to_string()),
            ("TIME", format!("{}:{:02}", seconds / 60, seconds % 60)),
            ("LEVEL", snap.level.to_string()),
            ("LINES", snap.lines.to_string()),
            ("GOAL", snap.goal.to_string()),
            ("TETRIS", snap.tetrises.to_string()),
            ("B2B", snap.combos.to_string()),
            ("TPM", format!("{:.1}", snap.tetrises_per_minute())),
            ("LPM", format!("{:.1}", snap.lines_per_minute())),
        ];
        for (i, (name, text)) in rows.iter().enumerate() {
            let row = y + i as u16;
            if row >= viewport.height {
                break;
            }
            fb.put_str(x, row, name, label);
            fb.put_str(x + 8, row, text, value);
        }
    }

    fn draw_flash(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &ViewLayout) {
        let style = Style::new(Rgb::new(255, 230, 120), MATRIX_BG).bold();
        let m = layout.matrix;
        let first = m.y + m.h / 3;
        for (i, message) in snap.flash.iter().enumerate() {
            put_centered(fb, m, first + i as u16, message, style);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, layout: &ViewLayout, lines: &[&str]) {
        let m = layout.matrix;
        let style = Style::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
        let mid = m.y + m.h / 2;
        let top = mid.saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as u16;
            fb.fill_rect(m.x, y, m.w, 1, ' ', style);
            put_centered(fb, m, y, line, style);
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, area: Area, y: u16, text: &str, style: Style) {
    let w = text.chars().count() as u16;
    let x = area.x + area.w.saturating_sub(w) / 2;
    fb.put_str(x, y, text, style);
}

/// Guideline piece colors.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::{Mino, TickInput};

    fn viewport() -> Viewport {
        Viewport::new(80, 30)
    }

    #[test]
    fn test_layout_fits_min_viewport() {
        let view = GameView::default();
        let min = view.min_viewport();
        let layout = view.layout(min);
        assert_eq!(layout.hold.x, 1);
        assert_eq!(layout.matrix.w, 20);
        assert_eq!(layout.matrix.h, 20);
        assert!(layout.next.right() < min.width);
        assert!(layout.matrix.bottom() < min.height);
    }

    #[test]
    fn test_small_viewport_asks_for_more_room() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Overlay::default(), Viewport::new(20, 5));
        assert!(fb.row_text(0).starts_with("enlarge terminal"));
    }

    #[test]
    fn test_bottom_row_is_drawn_last() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        snap.board[0][0] = Some(Mino {
            kind: PieceKind::Z,
            locked: true,
        });
        let fb = view.render(&snap, Overlay::default(), viewport());
        let m = view.layout(viewport()).matrix;

        let bottom = fb.get(m.x, m.bottom() - 1).unwrap();
        assert_eq!(bottom.ch, '█');
        assert_eq!(bottom.style.fg, piece_color(PieceKind::Z).darker(70));
        assert_eq!(fb.get(m.x, m.y).unwrap().ch, '·');
    }

    #[test]
    fn test_running_game_shows_piece_and_stats() {
        let view = GameView::default();
        let mut game = GameState::new(7);
        game.tick(16, &TickInput::default()).unwrap();
        let snap = game.snapshot();

        let fb = view.render(&snap, Overlay::default(), viewport());
        let layout = view.layout(viewport());
        let score_row = fb.row_text(layout.stats_y);
        assert!(score_row.contains("SCORE"));
        assert!(score_row.contains('0'));

        // spawned in the hidden rows, ghost visible at the floor
        let ghost = snap.ghost.unwrap();
        assert!(ghost.cells.iter().any(|c| c.row == 1));
        let floor = fb.row_text(layout.matrix.bottom() - 1);
        assert!(floor.contains('░'));
    }

    #[test]
    fn test_overlays() {
        let view = GameView::default();
        let snap = GameSnapshot::default();
        let fb = view.render(&snap, Overlay { paused: true }, viewport());
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("PAUSED"));

        let mut game = GameState::new(3);
        let mut input = TickInput::default();
        // stack pieces until the game ends
        input.hard_drop = true;
        for _ in 0..500 {
            if game.tick(16, &input).is_err() {
                break;
            }
        }
        let fb = view.render(&game.snapshot(), Overlay { paused: true }, viewport());
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("GAME OVER"));
        assert!(!text.contains("PAUSED"));
    }
}
