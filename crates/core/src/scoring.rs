//! Scoring module - Classic Tetris scoring and level progression
//!
//! - Line clears use the classic table, multiplied by `(level + 1)`.
//! - Every landed piece is worth `5 * (level + 1)`.
//! - The level goes up each time the cumulative cleared-line count crosses a
//!   multiple of 10. The bump happens before the clear is scored.

use crate::types::{DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level + 1)
}

/// Points for landing one piece at `level`
pub fn calculate_drop_score(level: u32) -> u32 {
    DROP_POINTS.saturating_mul(level + 1)
}

/// Whether going from `previous` to `total` cleared lines crosses a level boundary
pub fn crosses_level_boundary(previous: u32, total: u32) -> bool {
    previous % LINES_PER_LEVEL > total % LINES_PER_LEVEL
}

/// Score, level and cleared-line bookkeeping for one Tetris session,
/// plus the best score across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreManager {
    score: u32,
    level: u32,
    cleared_lines: u32,
    best: u32,
}

impl ScoreManager {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Start a new session. `best` survives.
    pub fn reset(&mut self) {
        self.record_best();
        self.score = 0;
        self.level = 0;
        self.cleared_lines = 0;
    }

    /// Register `lines` (0..=4) cleared by one landing. Returns the points awarded.
    pub fn add_cleared_lines(&mut self, lines: usize) -> u32 {
        let previous = self.cleared_lines;
        self.cleared_lines = self.cleared_lines.saturating_add(lines as u32);
        if crosses_level_boundary(previous, self.cleared_lines) {
            self.level += 1;
        }
        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Register one landed piece. Returns the points awarded.
    pub fn tetromino_dropped(&mut self) -> u32 {
        let points = calculate_drop_score(self.level);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Raise `best` to the live score. Returns the new best when it moved.
    pub fn record_best(&mut self) -> Option<u32> {
        if self.score > self.best {
            self.best = self.score;
            Some(self.best)
        } else {
            None
        }
    }
}
