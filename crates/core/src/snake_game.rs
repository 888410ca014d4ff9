//! Snake controller
//!
//! | input | Running | Paused / GameOver / Idle |
//! |---|---|---|
//! | tap | ignored | restart |
//! | swipe | turn (unless reversing) | restart |
//! | tick | one step | ignored |
//!
//! A turn sets a one-tick grace: while it is pending, running into the body
//! does not end the game and the step goes through as a plain move.

use std::collections::VecDeque;

use crate::scheduler::{TickScheduler, TickToken};
use crate::settings::{BoardSize, SnakeSettings};
use crate::snake_board::{velocity_for_direction, SnakeBoard, Tile};
use crate::store::{load_or_zero, save_or_warn, BestScoreStore};
use crate::types::*;
use crate::{ConfigError, SimpleRng};

pub struct SnakeGame {
    settings: SnakeSettings,
    board: SnakeBoard,
    /// Occupied positions, head at the front
    body: VecDeque<Position>,
    heading: Direction,
    changing_direction: bool,
    length: usize,
    state: PlayState,
    scheduler: TickScheduler,
    rng: SimpleRng,
    store: Box<dyn BestScoreStore>,
    best: u32,
    events: Vec<GameEvent>,
}

impl std::fmt::Debug for SnakeGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnakeGame")
            .field("state", &self.state)
            .field("heading", &self.heading)
            .field("length", &self.length)
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}

impl SnakeGame {
    /// Create an idle game on a `board`-sized field.
    pub fn new(
        settings: SnakeSettings,
        board: BoardSize,
        store: Box<dyn BestScoreStore>,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        settings.validate(board)?;
        let best = load_or_zero(store.as_ref());
        Ok(Self {
            board: SnakeBoard::new(board, settings.walls_looping),
            body: VecDeque::with_capacity(board.area()),
            heading: Direction::Left,
            changing_direction: false,
            length: settings.initial_size,
            state: PlayState::Idle,
            scheduler: TickScheduler::new(settings.interval_ms),
            rng: SimpleRng::new(seed),
            store,
            best,
            events: Vec::new(),
            settings,
        })
    }

    /// Size the field from a drawing surface: `floor(viewport / tile_size)`.
    pub fn from_viewport(
        settings: SnakeSettings,
        viewport_width: u32,
        viewport_height: u32,
        store: Box<dyn BestScoreStore>,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        let board = BoardSize::from_viewport(viewport_width, viewport_height, settings.tile_size)?;
        Self::new(settings, board, store, seed)
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn board(&self) -> &SnakeBoard {
        &self.board
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn score(&self) -> u32 {
        self.length.saturating_sub(self.settings.initial_size) as u32
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tiles written since the last call.
    pub fn dirty_tiles(&mut self) -> Vec<(Position, Tile)> {
        self.board.take_dirty()
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.body.clear();
        self.length = self.settings.initial_size;

        // Head at the start cell, body trailing off to the right.
        for i in 0..self.length as i32 {
            let pos = SNAKE_START.offset(Position::new(0, i));
            if let Some(pos) = self.board.loop_position(pos) {
                self.board.set(pos, Tile::body(Direction::Left));
                self.body.push_back(pos);
            }
        }
        for _ in 0..self.settings.initial_food {
            self.place_food();
        }

        self.heading = Direction::Left;
        self.changing_direction = true;
        self.state = PlayState::Running;
        let generation = self.scheduler.arm();
        tracing::debug!(generation, length = self.length, "snake restart");

        self.events.push(GameEvent::Score(0));
        self.events.push(GameEvent::Playing(true));
    }

    pub fn on_tap(&mut self) {
        if !self.state.is_running() {
            self.restart();
        }
    }

    pub fn on_swipe(&mut self, direction: Direction) {
        if !self.state.is_running() {
            self.restart();
            return;
        }
        if direction != self.heading.opposite() {
            self.changing_direction = true;
            self.heading = direction;
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

    /// Feed elapsed frame time; runs at most one step.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        match self.scheduler.advance(elapsed_ms) {
            Some(token) => self.on_tick(token),
            None => false,
        }
    }

    pub fn on_tick(&mut self, token: TickToken) -> bool {
        if !self.state.is_running() || !self.scheduler.is_current(token) {
            return false;
        }
        self.step();
        true
    }

    fn step(&mut self) {
        let Some(head) = self.head() else {
            return;
        };
        let proposed = head.offset(velocity_for_direction(self.heading));
        let Some(next) = self.board.loop_position(proposed) else {
            self.game_over();
            return;
        };
        let Some(tile) = self.board.get(next) else {
            self.game_over();
            return;
        };

        if tile.is_snake && !tile.is_food && !self.changing_direction {
            self.game_over();
            return;
        }

        self.board.set(head, Tile::body(self.heading));
        if tile.is_food {
            self.length += 1;
            self.body.push_front(next);
            self.board.set(next, Tile::body(self.heading));
            self.place_food();
            self.scored();
        } else {
            // Running onto the body during a turn leaves the tail in place.
            if !tile.is_snake {
                if let Some(tail) = self.body.pop_back() {
                    if !self.body.contains(&tail) {
                        self.board.set(tail, Tile::EMPTY);
                    }
                }
            }
            self.body.push_front(next);
            self.board.set(next, Tile::body(self.heading));
        }

        self.changing_direction = false;
    }

    /// Mark one random free tile as food. Does nothing on a full board.
    fn place_food(&mut self) {
        let free = self.board.free_positions();
        if let Some(&pos) = self.rng.choose(&free) {
            self.board.set(pos, Tile::FOOD);
        }
    }

    fn scored(&mut self) {
        let score = self.score();
        self.events.push(GameEvent::Score(score));
        if score > self.best {
            self.best = score;
            save_or_warn(self.store.as_mut(), score);
        }
    }

    fn game_over(&mut self) {
        self.state = PlayState::GameOver;
        self.scheduler.cancel();
        tracing::info!(score = self.score(), best = self.best, "snake game over");
        self.events.push(GameEvent::Playing(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn game(width: i32, height: i32) -> SnakeGame {
        SnakeGame::new(
            SnakeSettings::default(),
            BoardSize::new(width, height),
            Box::new(MemoryStore::default()),
            7,
        )
        .unwrap()
    }

    /// A running 10x10 game with every food tile removed.
    fn running_without_food() -> SnakeGame {
        let mut game = game(10, 10);
        game.restart();
        clear_food(&mut game);
        game.drain_events();
        game
    }

    fn clear_food(game: &mut SnakeGame) {
        let food: Vec<Position> = game
            .board
            .positions()
            .filter(|&pos| matches!(game.board.get(pos), Some(t) if t.is_food))
            .collect();
        for pos in food {
            game.board.set(pos, Tile::EMPTY);
        }
    }

    fn tick(game: &mut SnakeGame) {
        assert!(game.update(game.settings.interval_ms + 1));
    }

    #[test]
    fn test_restart_layout() {
        let mut game = game(10, 10);
        assert_eq!(game.state(), PlayState::Idle);
        game.on_tap();

        assert_eq!(game.state(), PlayState::Running);
        assert_eq!(game.head(), Some(Position::new(3, 3)));
        assert_eq!(game.tail(), Some(Position::new(3, 8)));
        assert_eq!(game.length(), 6);
        assert_eq!(game.heading(), Direction::Left);

        let food = game.board.tiles().iter().filter(|t| t.is_food).count();
        assert_eq!(food, 3);
        let snake = game.board.tiles().iter().filter(|t| t.is_snake).count();
        assert_eq!(snake, 6 + 3);

        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Score(0), GameEvent::Playing(true)]
        );
    }

    #[test]
    fn test_move_retracts_tail() {
        let mut game = running_without_food();
        tick(&mut game);
        assert_eq!(game.head(), Some(Position::new(3, 2)));
        assert_eq!(game.tail(), Some(Position::new(3, 7)));
        assert_eq!(game.board.get(Position::new(3, 8)), Some(Tile::EMPTY));
        assert_eq!(
            game.board.get(Position::new(3, 2)),
            Some(Tile::body(Direction::Left))
        );
    }

    #[test]
    fn test_eating_reports_score() {
        let mut game = running_without_food();
        game.board.set(Position::new(3, 2), Tile::FOOD);
        tick(&mut game);

        assert_eq!(game.length(), 7);
        assert_eq!(game.head(), Some(Position::new(3, 2)));
        assert_eq!(game.tail(), Some(Position::new(3, 8)));
        assert_eq!(game.drain_events(), vec![GameEvent::Score(1)]);
        assert_eq!(game.best(), 1);

        let food = game.board.tiles().iter().filter(|t| t.is_food).count();
        assert_eq!(food, 1);
    }

    #[test]
    fn test_self_intersection_ends_game() {
        let mut game = running_without_food();
        game.on_swipe(Direction::Down);
        tick(&mut game);
        tick(&mut game);
        game.on_swipe(Direction::Right);
        tick(&mut game);
        game.on_swipe(Direction::Up);
        tick(&mut game);
        assert_eq!(game.head(), Some(Position::new(4, 4)));
        assert_eq!(game.tail(), Some(Position::new(3, 4)));

        let before: Vec<Tile> = game.board.tiles().to_vec();
        game.drain_events();
        tick(&mut game);

        assert_eq!(game.state(), PlayState::GameOver);
        assert_eq!(game.drain_events(), vec![GameEvent::Playing(false)]);
        assert_eq!(game.board.tiles(), before.as_slice());
        assert!(!game.update(10_000));
    }

    #[test]
    fn test_pending_turn_suppresses_collision() {
        let mut game = running_without_food();
        game.on_swipe(Direction::Down);
        tick(&mut game);
        tick(&mut game);
        game.on_swipe(Direction::Right);
        tick(&mut game);
        game.on_swipe(Direction::Up);
        tick(&mut game);
        assert_eq!(game.tail(), Some(Position::new(3, 4)));
        // Same heading again: still counts as a turn for one tick.
        game.on_swipe(Direction::Up);
        tick(&mut game);

        assert_eq!(game.state(), PlayState::Running);
        assert_eq!(game.head(), Some(Position::new(3, 4)));
        assert_eq!(game.tail(), Some(Position::new(3, 4)));
        assert_eq!(game.length(), 6);

        // The shared cell stays part of the snake once the tail moves on.
        tick(&mut game);
        assert_eq!(game.head(), Some(Position::new(2, 4)));
        assert!(matches!(game.board.get(Position::new(3, 4)), Some(t) if t.is_snake));
        assert!(game.board.tiles().iter().all(|t| !t.is_food));
    }

    #[test]
    fn test_reverse_swipe_is_ignored() {
        let mut game = running_without_food();
        game.on_swipe(Direction::Right);
        assert_eq!(game.heading(), Direction::Left);
        game.on_swipe(Direction::Up);
        assert_eq!(game.heading(), Direction::Up);
    }

    #[test]
    fn test_head_wraps_around() {
        let mut game = running_without_food();
        for _ in 0..4 {
            tick(&mut game);
        }
        assert_eq!(game.head(), Some(Position::new(3, 9)));
    }

    #[test]
    fn test_solid_walls_end_game() {
        let settings = SnakeSettings {
            walls_looping: false,
            ..SnakeSettings::default()
        };
        let mut game = SnakeGame::new(
            settings,
            BoardSize::new(10, 10),
            Box::new(MemoryStore::default()),
            7,
        )
        .unwrap();
        game.restart();
        clear_food(&mut game);
        for _ in 0..3 {
            tick(&mut game);
        }
        assert_eq!(game.head(), Some(Position::new(3, 0)));
        tick(&mut game);
        assert_eq!(game.state(), PlayState::GameOver);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut game = running_without_food();
        assert!(game.set_paused(true));
        assert!(!game.set_paused(true));
        assert!(!game.update(10_000));
        assert_eq!(game.head(), Some(Position::new(3, 3)));

        assert!(game.set_paused(false));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Playing(false), GameEvent::Playing(true)]
        );
        tick(&mut game);
        assert_eq!(game.head(), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_tap_while_running_is_ignored() {
        let mut game = running_without_food();
        tick(&mut game);
        game.on_tap();
        assert_eq!(game.head(), Some(Position::new(3, 2)));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_from_viewport() {
        let game = SnakeGame::from_viewport(
            SnakeSettings::default(),
            305,
            299,
            Box::new(MemoryStore::default()),
            1,
        )
        .unwrap();
        assert_eq!(game.board().size(), BoardSize::new(10, 9));

        let err = SnakeGame::from_viewport(
            SnakeSettings::default(),
            20,
            20,
            Box::new(MemoryStore::default()),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroViewport { .. }));
    }

    #[test]
    fn test_zero_initial_size_is_rejected() {
        let settings = SnakeSettings {
            initial_size: 0,
            ..SnakeSettings::default()
        };
        let err = SnakeGame::new(
            settings,
            BoardSize::new(10, 10),
            Box::new(MemoryStore::default()),
            1,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroInitialSize);
    }

    #[test]
    fn test_dirty_tiles_after_step() {
        let mut game = running_without_food();
        game.dirty_tiles();
        tick(&mut game);
        let dirty: Vec<Position> = game.dirty_tiles().into_iter().map(|(p, _)| p).collect();
        assert!(dirty.contains(&Position::new(3, 2)));
        assert!(dirty.contains(&Position::new(3, 8)));
    }
}
