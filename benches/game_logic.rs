use criterion::{black_box, criterion_group, criterion_main, Criterion};
use guideline_tetris::core::{Board, GameState, Piece, Randomizer};
use guideline_tetris::term::{FrameBuffer, GameView, Overlay, Viewport};
use guideline_tetris::types::{Coord, Mino, PieceKind, RotationDirection, TickInput, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let idle = TickInput::default();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.tick(black_box(TICK_MS), &idle).is_err() {
                state.restart(12345);
            }
        })
    });
}

fn bench_hard_drop_session(c: &mut Criterion) {
    let drop = TickInput {
        hard_drop: true,
        ..TickInput::default()
    };

    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(7));
            while state.tick(TICK_MS, &drop).is_ok() {}
            state.score()
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 1..=4 {
                for column in 1..=10 {
                    board.set(
                        Coord::new(column, row),
                        Some(Mino {
                            kind: PieceKind::I,
                            locked: true,
                        }),
                    );
                }
            }
            for row in 1..=4 {
                while board.is_row_filled(row) {
                    board.clear_row(row);
                    board.shift_down(row + 1);
                }
            }
            board
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::T);
    piece.move_bottom_left_to(4, 10);

    c.bench_function("rotate_t", |b| {
        b.iter(|| piece.rotate(black_box(&board), RotationDirection::Clockwise))
    });
}

fn bench_randomizer(c: &mut Criterion) {
    let mut randomizer = Randomizer::new(12345, 6);

    c.bench_function("randomizer_draw", |b| b.iter(|| randomizer.draw()));
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.tick(TICK_MS, &TickInput::default()).ok();
    let snap = state.snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(80, 30);
    let mut fb = FrameBuffer::new(80, 30);

    c.bench_function("render_into_80x30", |b| {
        b.iter(|| view.render_into(black_box(&snap), Overlay::default(), viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_session,
    bench_line_clear,
    bench_rotate,
    bench_randomizer,
    bench_render
);
criterion_main!(benches);
