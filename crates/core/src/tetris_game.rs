//! Tetris controller - owns the stage, the falling piece and the score
//!
//! Every move or rotation is applied to the piece first and checked against the
//! stage right after; a colliding change is undone before anything else
//! happens, so a rejected input leaves the game exactly as it was.

use crate::paint::StagePainter;
use crate::pieces::Tetromino;
use crate::scheduler::{TickScheduler, TickToken};
use crate::scoring::ScoreManager;
use crate::settings::TetrisSettings;
use crate::stage::Stage;
use crate::store::{load_or_zero, save_or_warn, BestScoreStore};
use crate::types::*;
use crate::{ConfigError, SimpleRng};

/// A Tetris session and its controller state machine
pub struct TetrisGame {
    settings: TetrisSettings,
    stage: Stage,
    current: Tetromino,
    next: Tetromino,
    scores: ScoreManager,
    state: PlayState,
    scheduler: TickScheduler,
    rng: SimpleRng,
    store: Box<dyn BestScoreStore>,
    painter: StagePainter,
    events: Vec<GameEvent>,
}

impl std::fmt::Debug for TetrisGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TetrisGame")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}

impl TetrisGame {
    /// Create an idle game. Fails on a degenerate stage or interval.
    pub fn new(
        settings: TetrisSettings,
        store: Box<dyn BestScoreStore>,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = SimpleRng::new(seed);
        let width = settings.width;
        let current = Tetromino::new(rng.next_piece(), width);
        let next = Tetromino::new(rng.next_piece(), width);
        let best = load_or_zero(store.as_ref());

        Ok(Self {
            stage: Stage::new(settings.board_size()),
            scheduler: TickScheduler::new(settings.interval_ms),
            painter: StagePainter::new(&settings),
            settings,
            current,
            next,
            scores: ScoreManager::new(best),
            state: PlayState::Idle,
            rng,
            store,
            events: Vec::new(),
        })
    }

    pub fn settings(&self) -> &TetrisSettings {
        &self.settings
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next.kind
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn cleared_lines(&self) -> u32 {
        self.scores.cleared_lines()
    }

    pub fn best(&self) -> u32 {
        self.scores.best()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Take the events buffered since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draw requests for cells that changed since the previous call.
    ///
    /// The falling piece is shown in every state except Idle.
    pub fn paint(&mut self) -> Vec<BlockDraw> {
        let active = match self.state {
            PlayState::Idle => None,
            _ => Some(&self.current),
        };
        self.painter.paint(&self.stage, active)
    }

    /// Start a fresh session: empty stage, new pieces, zero score, Running.
    pub fn restart(&mut self) {
        self.stage.reset();
        self.painter.invalidate();
        self.scores.reset();

        let width = self.settings.width;
        self.current = Tetromino::new(self.rng.next_piece(), width);
        self.next = Tetromino::new(self.rng.next_piece(), width);

        self.state = PlayState::Running;
        let generation = self.scheduler.arm();
        tracing::debug!(generation, current = ?self.current.kind, "tetris restart");

        self.events.push(GameEvent::Score(0));
        self.events.push(GameEvent::NextPiece(self.next.kind));
        self.events.push(GameEvent::Playing(true));
    }

    pub fn on_tap(&mut self) {
        if !self.state.is_running() {
            self.restart();
        }
    }

    /// Swipes: left/right move, up rotates, down hard-drops.
    pub fn on_swipe(&mut self, direction: Direction) {
        if !self.state.is_running() {
            self.restart();
            return;
        }
        let action = match direction {
            Direction::Left => TetrisAction::MoveLeft,
            Direction::Right => TetrisAction::MoveRight,
            Direction::Up => TetrisAction::Rotate,
            Direction::Down => TetrisAction::HardDrop,
        };
        self.on_key(action);
    }

    /// Apply a keyboard command. Returns whether the game changed.
    pub fn on_key(&mut self, action: TetrisAction) -> bool {
        if action == TetrisAction::Pause {
            return match self.state {
                PlayState::Running => self.set_paused(true),
                PlayState::Paused => self.set_paused(false),
                _ => false,
            };
        }
        if !self.state.is_running() {
            return false;
        }
        match action {
            TetrisAction::MoveLeft => self.try_move(-1, 0),
            TetrisAction::MoveRight => self.try_move(1, 0),
            TetrisAction::Rotate => self.try_rotate(),
            TetrisAction::SoftDrop => {
                self.drop_step();
                true
            }
            TetrisAction::HardDrop => {
                self.hard_drop();
                true
            }
            TetrisAction::Pause => false,
        }
    }

    /// Toggle Running <-> Paused. Returns whether the state changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        match (self.state, paused) {
            (PlayState::Running, true) => {
                self.state = PlayState::Paused;
                self.scheduler.cancel();
            }
            (PlayState::Paused, false) => {
                self.state = PlayState::Running;
                self.scheduler.arm();
            }
            _ => return false,
        }
        self.events.push(GameEvent::Playing(!paused));
        true
    }

    /// Feed elapsed frame time; runs at most one gravity step.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        match self.scheduler.advance(elapsed_ms) {
            Some(token) => self.on_tick(token),
            None => false,
        }
    }

    /// Run one gravity step for `token`. Stale tokens and ticks outside the
    /// Running state are ignored.
    pub fn on_tick(&mut self, token: TickToken) -> bool {
        if !self.state.is_running() || !self.scheduler.is_current(token) {
            return false;
        }
        self.drop_step();
        true
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        self.current.move_by(dx, dy);
        if self.stage.is_collision(&self.current) {
            self.current.move_by(-dx, -dy);
            return false;
        }
        true
    }

    fn try_rotate(&mut self) -> bool {
        self.current.rotate();
        if self.stage.is_collision(&self.current) {
            self.current.anti_rotate();
            return false;
        }
        true
    }

    /// Gravity: one row down, landing when blocked.
    fn drop_step(&mut self) {
        if !self.try_move(0, 1) {
            self.land();
        }
    }

    fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
        self.land();
    }

    /// Freeze the current piece, score the landing and promote the next piece.
    fn land(&mut self) {
        let lines = self.stage.unite(&self.current);
        if lines > 0 {
            self.scores.add_cleared_lines(lines);
        }
        self.scores.tetromino_dropped();
        tracing::debug!(
            kind = ?self.current.kind,
            lines,
            score = self.scores.score(),
            level = self.scores.level(),
            "piece landed"
        );
        self.events.push(GameEvent::Score(self.scores.score()));
        if let Some(best) = self.scores.record_best() {
            save_or_warn(self.store.as_mut(), best);
        }

        self.current = self.next;
        self.next = Tetromino::new(self.rng.next_piece(), self.settings.width);
        self.events.push(GameEvent::NextPiece(self.next.kind));

        if self.stage.is_collision(&self.current) {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.state = PlayState::GameOver;
        self.scheduler.cancel();
        tracing::info!(
            score = self.scores.score(),
            lines = self.scores.cleared_lines(),
            best = self.scores.best(),
            "tetris game over"
        );
        self.events.push(GameEvent::Playing(false));
    }
}
