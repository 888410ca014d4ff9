//! Snake controller tests driven only through the public surface

use pocket_arcade::core::{BoardSize, MemoryStore, SnakeGame, SnakeSettings, SimpleRng};
use pocket_arcade::types::{Direction, GameEvent, PlayState};

fn new_game(width: i32, height: i32, settings: SnakeSettings) -> SnakeGame {
    SnakeGame::new(
        settings,
        BoardSize::new(width, height),
        Box::new(MemoryStore::default()),
        11,
    )
    .unwrap()
}

fn step(game: &mut SnakeGame) -> bool {
    game.update(game.settings().interval_ms + 1)
}

#[test]
fn test_head_stays_on_board_with_wrap() {
    let mut game = new_game(10, 10, SnakeSettings::default());
    game.restart();
    let mut rng = SimpleRng::new(77);

    for _ in 0..500 {
        if game.state() != PlayState::Running {
            game.on_tap();
        }
        if rng.next_range(3) == 0 {
            if let Some(&dir) = rng.choose(&Direction::ALL) {
                game.on_swipe(dir);
            }
        }
        step(&mut game);
        let head = game.head().unwrap();
        assert!(game.board().size().contains(head), "{head:?}");
    }
}

#[test]
fn test_reverse_swipe_is_a_no_op() {
    let mut game = new_game(10, 10, SnakeSettings::default());
    game.restart();
    game.on_swipe(Direction::Right);
    assert_eq!(game.heading(), Direction::Left);
    step(&mut game);
    assert_eq!(game.head().map(|p| p.col), Some(2));
}

#[test]
fn test_score_tracks_length() {
    let settings = SnakeSettings {
        initial_food: 40,
        ..SnakeSettings::default()
    };
    let mut game = new_game(8, 8, settings);
    game.restart();
    game.drain_events();

    for _ in 0..8 {
        step(&mut game);
        if game.state() != PlayState::Running {
            break;
        }
    }
    let scores: Vec<u32> = game
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::Score(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(game.score() as usize, game.length() - 6);
    assert_eq!(scores.last().copied().unwrap_or(0), game.score());
    assert_eq!(game.best(), game.score());
}

#[test]
fn test_restart_twice_equals_once() {
    let mut game = new_game(10, 10, SnakeSettings::default());
    game.restart();
    step(&mut game);
    game.restart();

    assert_eq!(game.length(), 6);
    assert_eq!(game.head(), Some(pocket_arcade::types::SNAKE_START));
    let food = game.board().tiles().iter().filter(|t| t.is_food).count();
    assert_eq!(food, 3);

    // A single timer: one long frame is one step.
    assert!(game.update(10_000));
    assert!(!game.update(1));
}

#[test]
fn test_board_too_small_is_rejected() {
    let err = SnakeGame::new(
        SnakeSettings::default(),
        BoardSize::new(4, 10),
        Box::new(MemoryStore::default()),
        1,
    )
    .unwrap_err();
    assert!(err.to_string().contains("4x10"));
}
