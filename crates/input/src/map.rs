//! Key mapping from terminal events to game inputs.

use crate::types::{Direction, GameKind, TetrisAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Abstract input accepted by both controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeInput {
    Tap,
    Swipe(Direction),
    Key(TetrisAction),
    /// Toggle pause (Snake has no key-press surface of its own)
    Pause,
}

fn direction_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Direction::Down),
        _ => None,
    }
}

/// Map keyboard input to a game input for `game`.
///
/// Key releases are ignored.
pub fn map_key(game: GameKind, key: KeyEvent) -> Option<ArcadeInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Enter {
        return Some(ArcadeInput::Tap);
    }

    match game {
        GameKind::Snake => match key.code {
            KeyCode::Char(' ') => Some(ArcadeInput::Tap),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(ArcadeInput::Pause),
            code => direction_key(code).map(ArcadeInput::Swipe),
        },
        GameKind::Tetris => {
            let action = match key.code {
                KeyCode::Char(' ') => TetrisAction::HardDrop,
                KeyCode::Char('p') | KeyCode::Char('P') => TetrisAction::Pause,
                code => match direction_key(code)? {
                    Direction::Left => TetrisAction::MoveLeft,
                    Direction::Right => TetrisAction::MoveRight,
                    Direction::Up => TetrisAction::Rotate,
                    Direction::Down => TetrisAction::SoftDrop,
                },
            };
            Some(ArcadeInput::Key(action))
        }
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn tetris(code: KeyCode) -> Option<ArcadeInput> {
        map_key(GameKind::Tetris, KeyEvent::from(code))
    }

    fn snake(code: KeyCode) -> Option<ArcadeInput> {
        map_key(GameKind::Snake, KeyEvent::from(code))
    }

    #[test]
    fn test_tetris_movement_keys() {
        assert_eq!(tetris(KeyCode::Left), Some(ArcadeInput::Key(TetrisAction::MoveLeft)));
        assert_eq!(tetris(KeyCode::Char('L')), Some(ArcadeInput::Key(TetrisAction::MoveRight)));
        assert_eq!(tetris(KeyCode::Char('w')), Some(ArcadeInput::Key(TetrisAction::Rotate)));
        assert_eq!(tetris(KeyCode::Down), Some(ArcadeInput::Key(TetrisAction::SoftDrop)));
    }

    #[test]
    fn test_tetris_action_keys() {
        assert_eq!(tetris(KeyCode::Char(' ')), Some(ArcadeInput::Key(TetrisAction::HardDrop)));
        assert_eq!(tetris(KeyCode::Char('p')), Some(ArcadeInput::Key(TetrisAction::Pause)));
        assert_eq!(tetris(KeyCode::Enter), Some(ArcadeInput::Tap));
        assert_eq!(tetris(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_snake_keys() {
        assert_eq!(snake(KeyCode::Up), Some(ArcadeInput::Swipe(Direction::Up)));
        assert_eq!(snake(KeyCode::Char('h')), Some(ArcadeInput::Swipe(Direction::Left)));
        assert_eq!(snake(KeyCode::Char('S')), Some(ArcadeInput::Swipe(Direction::Down)));
        assert_eq!(snake(KeyCode::Char(' ')), Some(ArcadeInput::Tap));
        assert_eq!(snake(KeyCode::Char('P')), Some(ArcadeInput::Pause));
    }

    #[test]
    fn test_direction_aliases() {
        let aliases = [
            (KeyCode::Left, "hHaA", Direction::Left),
            (KeyCode::Right, "lLdD", Direction::Right),
            (KeyCode::Up, "kKwW", Direction::Up),
            (KeyCode::Down, "jJsS", Direction::Down),
        ];
        for (arrow, letters, dir) in aliases {
            assert_eq!(direction_key(arrow), Some(dir));
            for c in letters.chars() {
                assert_eq!(direction_key(KeyCode::Char(c)), Some(dir), "key {c:?}");
            }
        }
        assert_eq!(direction_key(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(GameKind::Tetris, release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
