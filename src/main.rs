//! Blockfall runner (default binary).
//!
//! Interactive mode uses crossterm for input and the framebuffer renderer.
//! `--headless` swaps the terminal for a stdin/stdout JSON loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use blockfall::cli::Args;
use blockfall::core::{Game, GameSnapshot};
use blockfall::headless::Session;
use blockfall::input::{handle_key_event, is_repeatable, should_quit, InputHandler};
use blockfall::logging;
use blockfall::term::{
    snapshot_fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use blockfall::types::TICK_MS;

/// Redraw an unchanged game-over screen at most this often.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.headless {
        logging::init_stderr()?;
    } else if let Some(path) = &args.log_file {
        logging::init_file(path)?;
    }

    let config = args.game_config()?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        headless = args.headless,
        "starting"
    );
    let game = Game::new(config)?;

    if args.headless {
        let stdin = io::stdin();
        return Session::new(game, args.scene).run(stdin.lock(), io::stdout().lock());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: Game, args: &Args) -> Result<()> {
    game.start();

    let view = GameView::default();
    let mut input_handler = InputHandler::with_config(args.das_ms, args.arr_ms);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snapshot_fingerprint(&snap), snap.game_over()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!(score = game.score(), lines = game.lines(), "quit");
                            return Ok(());
                        }
                        // Directional keys go through DAS/ARR, the rest straight in.
                        match handle_key_event(key) {
                            Some(cmd) if is_repeatable(cmd) => {
                                if let Some(cmd) = input_handler.handle_key_press(key.code) {
                                    game.apply(cmd);
                                }
                            }
                            Some(cmd) => {
                                game.apply(cmd);
                            }
                            None => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            for cmd in input_handler.update(TICK_MS) {
                game.apply(cmd);
            }
            game.advance(TICK_MS);
        }
    }
}
