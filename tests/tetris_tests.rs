//! Tetris controller tests - lifecycle, gravity and best-score persistence

use pocket_arcade::core::{
    BestScoreStore, JsonFileStore, MemoryStore, TetrisGame, TetrisSettings,
};
use pocket_arcade::types::{Direction, GameEvent, PlayState, TetrisAction};

fn new_game(seed: u32) -> TetrisGame {
    TetrisGame::new(TetrisSettings::default(), Box::new(MemoryStore::default()), seed).unwrap()
}

/// Hard-drop until the stack reaches the top.
fn play_until_game_over(game: &mut TetrisGame) -> usize {
    let mut drops = 0;
    while game.state() == PlayState::Running {
        game.on_key(TetrisAction::HardDrop);
        drops += 1;
        assert!(drops < 1_000, "game never ended");
    }
    drops
}

#[test]
fn test_game_lifecycle() {
    let mut game = new_game(12345);
    assert_eq!(game.state(), PlayState::Idle);

    game.on_tap();
    assert_eq!(game.state(), PlayState::Running);
    assert!(game.scheduler().is_armed());

    play_until_game_over(&mut game);
    assert_eq!(game.state(), PlayState::GameOver);
    assert!(!game.scheduler().is_armed());
    assert!(game.drain_events().contains(&GameEvent::Playing(false)));

    // Any swipe restarts a finished game.
    game.on_swipe(Direction::Left);
    assert_eq!(game.state(), PlayState::Running);
    assert_eq!(game.score(), 0);
    assert!(game.stage().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_restart_twice_equals_once() {
    let mut game = new_game(99);
    game.restart();
    let first_generation = game.scheduler().generation();
    game.restart();

    assert_eq!(game.state(), PlayState::Running);
    assert!(game.scheduler().is_armed());
    assert!(game.scheduler().generation() > first_generation);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 0);

    // Only one timer: a single long frame fires one gravity step.
    let y = game.current().y;
    assert!(game.update(10_000));
    assert_eq!(game.current().y, y + 1);
    assert!(!game.update(1));
}

#[test]
fn test_swipes_map_to_moves() {
    let mut game = new_game(5);
    game.restart();
    let x = game.current().x;

    game.on_swipe(Direction::Right);
    assert_eq!(game.current().x, x + 1);
    game.on_swipe(Direction::Left);
    assert_eq!(game.current().x, x);

    let angle = game.current().angle;
    game.on_swipe(Direction::Up);
    assert_ne!(game.current().angle, angle);

    game.drain_events();
    game.on_swipe(Direction::Down);
    assert!(game
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::Score(s) if *s > 0)));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = new_game(2024);
    let mut b = new_game(2024);
    a.restart();
    b.restart();
    for _ in 0..20 {
        a.on_key(TetrisAction::HardDrop);
        b.on_key(TetrisAction::HardDrop);
    }
    assert_eq!(a.stage(), b.stage());
    assert_eq!(a.score(), b.score());
    assert_eq!(a.next_kind(), b.next_kind());
}

#[test]
fn test_best_score_persists_across_sessions() {
    let dir = std::env::temp_dir().join(format!("pocket-arcade-tetris-{}", std::process::id()));
    let store = JsonFileStore::in_dir(&dir, "tetris");

    let mut game = TetrisGame::new(TetrisSettings::default(), Box::new(store.clone()), 1).unwrap();
    game.restart();
    play_until_game_over(&mut game);
    let best = game.best();
    assert!(best > 0);
    assert_eq!(store.load().unwrap(), best);

    let reopened = TetrisGame::new(TetrisSettings::default(), Box::new(store), 2).unwrap();
    assert_eq!(reopened.best(), best);

    let _ = std::fs::remove_dir_all(&dir);
}
