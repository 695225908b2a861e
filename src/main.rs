//! Terminal guideline Tetris (default binary).
//!
//! Runs the game loop on fixed 16 ms ticks with crossterm for input and the
//! framebuffer renderer for output. When a finished session is left with `q`,
//! the terminal is restored and the score can be entered on the leaderboard.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use guideline_tetris::core::{GameOver, GameSnapshot, GameState, Rules};
use guideline_tetris::input::{Controls, Rect, SessionAction, TouchLayout};
use guideline_tetris::leaderboard::{Entry, FileLeaderboard, Submission};
use guideline_tetris::term::{Area, FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use guideline_tetris::types::TICK_MS;

/// Upper bound for one tick's elapsed time (e.g. after the process was
/// suspended), so gravity does not fast-forward the piece to the floor.
const MAX_TICK_MS: u32 = 250;

/// How a finished session ended, for the leaderboard prompt.
struct Finished {
    reason: GameOver,
    submission: Submission,
}

fn main() -> Result<()> {
    env_logger::init();

    let rules = Rules::from_env();
    log::debug!("rules: {:?}", rules);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, rules);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(finished) = result? {
        offer_leaderboard(finished)?;
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, rules: Rules) -> Result<Option<Finished>> {
    let mut game = GameState::with_rules(clock_seed(), rules);
    let view = GameView::default();
    let mut controls = Controls::new(
        rules.delayed_auto_shift_ms,
        rules.auto_repeat_ms,
        touch_layout(&view, Viewport::new(0, 0)),
    )
    .with_pointer_scale(f32::from(view.cell_w()), f32::from(view.cell_h()));
    if term.keyboard_enhanced() {
        log::info!("terminal reports key releases");
    }

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut viewport = Viewport::new(0, 0);
    let mut paused = false;

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if viewport != Viewport::new(w, h) {
            viewport = Viewport::new(w, h);
            controls.set_touch_layout(touch_layout(&view, viewport));
            term.invalidate();
        }
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Overlay { paused }, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            if let Event::Resize(..) = event {
                term.invalidate();
            }
            match controls.handle_event(&event) {
                Some(SessionAction::Quit) => return Ok(finished(&game)),
                Some(SessionAction::Pause) if game.game_over().is_none() => {
                    paused = !paused;
                    controls.reset();
                    log::info!("{}", if paused { "paused" } else { "resumed" });
                }
                Some(SessionAction::Restart) => {
                    game.restart(clock_seed());
                    controls.reset();
                    paused = false;
                }
                Some(SessionAction::Pause) | None => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = (last_tick.elapsed().as_millis() as u32).min(MAX_TICK_MS);
            last_tick = Instant::now();

            let input = controls.tick(elapsed_ms);
            if paused || game.game_over().is_some() {
                continue;
            }
            if let Err(reason) = game.tick(elapsed_ms, &input) {
                log::info!("session over after {} ms: {}", game.game_time_ms(), reason);
            }
            for event in game.drain_events() {
                log::debug!("{}: {:?}", event.name(), event);
            }
        }
    }
}

/// Pointer units are matrix cells, matching `with_pointer_scale`.
fn touch_layout(view: &GameView, viewport: Viewport) -> TouchLayout {
    let layout = view.layout(viewport);
    let (sx, sy) = (f32::from(view.cell_w()), f32::from(view.cell_h()));
    let rect = |a: Area| Rect {
        left: f32::from(a.x) / sx,
        top: f32::from(a.y) / sy,
        right: f32::from(a.right()) / sx,
        bottom: f32::from(a.bottom()) / sy,
    };
    TouchLayout {
        cell_size: 1.0,
        matrix: rect(layout.matrix),
        hold: rect(layout.hold),
    }
}

fn finished(game: &GameState) -> Option<Finished> {
    let reason = game.game_over()?;
    Some(Finished {
        reason,
        submission: Submission {
            score: game.score(),
            level: game.level(),
            time_ms: game.game_time_ms(),
        },
    })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

/// Ask for a name on stdin and submit. Leaderboard failures are reported but
/// do not fail the process.
fn offer_leaderboard(finished: Finished) -> Result<()> {
    let Submission { score, level, .. } = finished.submission;
    println!("Game over ({}). Score {score}, level {level}.", finished.reason.as_str());
    print!("Name for the leaderboard (empty to skip): ");
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().lock().read_line(&mut name)?;
    if name.trim().is_empty() {
        return Ok(());
    }

    let board = FileLeaderboard::from_env();
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        board.submit(&name, finished.submission).await?;
        board.top().await
    });

    match result {
        Ok(entries) => print_leaderboard(&entries),
        Err(err) => {
            log::warn!("leaderboard at {} failed: {err:#}", board.path().display());
            eprintln!("Leaderboard unavailable: {err:#}");
        }
    }
    Ok(())
}

fn print_leaderboard(entries: &[Entry]) {
    println!();
    println!("{:>3}  {:<30} {:>8} {:>5} {:>7}", "#", "NAME", "SCORE", "LEVEL", "TIME");
    for (i, entry) in entries.iter().enumerate() {
        let seconds = entry.time_ms / 1000;
        println!(
            "{:>3}  {:<30} {:>8} {:>5} {:>4}:{:02}",
            i + 1,
            entry.name,
            entry.score,
            entry.level,
            seconds / 60,
            seconds % 60
        );
    }
}
