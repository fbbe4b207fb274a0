//! Terminal runner (default binary).
//!
//! Polls crossterm key events, dispatches them through the engine's cooldown
//! gating and advances the session in fixed `TICK_MS` steps. Rendering goes
//! through the framebuffer diff renderer.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::GameSnapshot;
use blockfall::engine::{HighScoreStore, Session, DEFAULT_HIGH_SCORE_FILE};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameConfig, GRAVITY_MS, LOCK_DELAY_MS, TICK_MS};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Left/Right  Move       Up     Rotate     Down   Soft drop\n  \
        Space       Hard drop  C      Hold       P      Pause\n  \
        Enter       Start      Q      Menu (paused)  Esc / Ctrl-C  Quit"
)]
struct Args {
    /// Seed for the piece randomizer (default: derived from the clock).
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// File holding the high score as a plain decimal number.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Clear full rows after each lock.
    #[arg(long)]
    line_clear: bool,

    /// Milliseconds between gravity steps.
    #[arg(long, value_name = "MS", default_value_t = GRAVITY_MS)]
    gravity_ms: u32,

    /// Milliseconds a grounded piece waits before locking.
    #[arg(long, value_name = "MS", default_value_t = LOCK_DELAY_MS)]
    lock_delay_ms: u32,
}

impl Args {
    fn config(&self) -> Result<GameConfig> {
        let config = GameConfig {
            gravity_ms: self.gravity_ms,
            lock_delay_ms: self.lock_delay_ms,
            line_clear: self.line_clear,
            ..GameConfig::default()
        };
        config.validate().context("invalid game configuration")?;
        Ok(config)
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config()?;
    let store = HighScoreStore::new(&args.high_score_file);
    let mut session = Session::new(config, args.seed(), store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                // Repeats pass through; the cooldowns rate-limit them.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }

        // Nothing in the terminal front-end reacts to events yet.
        session.drain_events().for_each(drop);
    }
}
