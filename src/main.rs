//! Terminal arcade runner (default binary).
//!
//! `pocket-arcade [snake|tetris]`, Tetris by default. Input comes from
//! crossterm, frames go through the framebuffer renderer, and the game cores
//! are driven by the wall time elapsed between frames. Tracing output goes to
//! the file named by `ARCADE_LOG_PATH`; stdout belongs to the game screen.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::prelude::*;

use pocket_arcade::core::{
    ArcadeConfig, BestScoreStore, BoardSize, JsonFileStore, MemoryStore, SnakeGame,
    SnakeSettings, TetrisGame, TetrisSettings,
};
use pocket_arcade::input::{map_key, should_quit, ArcadeInput};
use pocket_arcade::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use pocket_arcade::types::{GameKind, TetrisAction};

const FRAME: Duration = Duration::from_millis(16);

/// Largest snake field the terminal host will open, in tiles.
const SNAKE_MAX_COLS: u16 = 32;
const SNAKE_MAX_ROWS: u16 = 24;

fn main() -> Result<()> {
    let kind = match std::env::args().nth(1) {
        Some(arg) => match GameKind::from_str(&arg) {
            Some(kind) => kind,
            None => bail!("unknown game {arg:?} (expected `snake` or `tetris`)"),
        },
        None => GameKind::default(),
    };

    let config = ArcadeConfig::from_env();
    init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(clock_seed);
    let store = open_store(&config, kind);
    tracing::info!(game = kind.as_str(), seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, kind, store, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &ArcadeConfig) -> Result<()> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();
    Ok(())
}

fn open_store(config: &ArcadeConfig, kind: GameKind) -> Box<dyn BestScoreStore> {
    match &config.best_score_dir {
        Some(dir) => Box::new(JsonFileStore::in_dir(dir, kind.as_str())),
        None => Box::new(MemoryStore::default()),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

enum Session {
    Snake(SnakeGame),
    Tetris(TetrisGame),
}

impl Session {
    fn open(
        kind: GameKind,
        store: Box<dyn BestScoreStore>,
        seed: u32,
        view: &mut GameView,
    ) -> Result<Self> {
        match kind {
            GameKind::Snake => {
                let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
                // Two columns per tile, minus the border and the HUD.
                let cols = (w.saturating_sub(20) / 2).min(SNAKE_MAX_COLS);
                let rows = h.saturating_sub(2).min(SNAKE_MAX_ROWS);
                let board = BoardSize::new(cols as i32, rows as i32);
                let game = SnakeGame::new(SnakeSettings::from_env(), board, store, seed)
                    .context("terminal too small for snake")?;
                view.set_board_size(cols, rows);
                Ok(Session::Snake(game))
            }
            GameKind::Tetris => {
                let settings = TetrisSettings::from_env();
                view.set_board_size(settings.width as u16, settings.height as u16);
                Ok(Session::Tetris(TetrisGame::new(settings, store, seed)?))
            }
        }
    }

    fn apply(&mut self, input: ArcadeInput) {
        match (self, input) {
            (Session::Snake(game), ArcadeInput::Tap) => game.on_tap(),
            (Session::Snake(game), ArcadeInput::Swipe(dir)) => game.on_swipe(dir),
            (Session::Snake(game), ArcadeInput::Pause) => {
                let running = game.state().is_running();
                game.set_paused(running);
            }
            (Session::Snake(_), ArcadeInput::Key(_)) => {}
            (Session::Tetris(game), ArcadeInput::Tap) => game.on_tap(),
            (Session::Tetris(game), ArcadeInput::Swipe(dir)) => game.on_swipe(dir),
            (Session::Tetris(game), ArcadeInput::Key(action)) => {
                game.on_key(action);
            }
            (Session::Tetris(game), ArcadeInput::Pause) => {
                game.on_key(TetrisAction::Pause);
            }
        }
    }

    fn update(&mut self, elapsed_ms: u32) {
        let events = match self {
            Session::Snake(game) => {
                game.update(elapsed_ms);
                game.drain_events()
            }
            Session::Tetris(game) => {
                game.update(elapsed_ms);
                game.drain_events()
            }
        };
        for event in events {
            tracing::trace!(?event, "game event");
        }
    }

    fn paint(&mut self, view: &mut GameView) {
        match self {
            Session::Snake(game) => {
                let grid = game.settings().has_grid;
                view.apply_tiles(&game.dirty_tiles(), grid);
            }
            Session::Tetris(game) => {
                let square = game.settings().square_size;
                view.apply_blocks(&game.paint(), square);
            }
        }
    }

    fn hud(&self) -> Hud {
        match self {
            Session::Snake(game) => Hud {
                title: "SNAKE",
                score: game.score(),
                best: game.best(),
                level: None,
                lines: None,
                next: None,
                state: game.state(),
            },
            Session::Tetris(game) => Hud {
                title: "TETRIS",
                score: game.score(),
                best: game.best(),
                level: Some(game.level()),
                lines: Some(game.cleared_lines()),
                next: Some(game.next_kind()),
                state: game.state(),
            },
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    kind: GameKind,
    store: Box<dyn BestScoreStore>,
    seed: u32,
) -> Result<()> {
    let mut view = GameView::default();
    let mut session = Session::open(kind, store, seed, &mut view)?;
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    loop {
        // Render.
        session.paint(&mut view);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.hud(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(input) = map_key(kind, key) {
                        session.apply(input);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
        last = now;
        session.update(elapsed);
    }
}
