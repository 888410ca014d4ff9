//! Block painting for the Tetris stage.
//!
//! [`StagePainter`] remembers what every cell looked like at the last paint
//! and only emits a [`BlockDraw`] for cells whose look changed. The falling
//! piece is overlaid on the frozen stage before diffing.
//!
//! A host that rasterizes blocks into its own texture type can keep one
//! [`TextureCache`] per session; textures are keyed by fill color because the
//! size and border never change within a session.

use std::collections::HashMap;

use crate::pieces::Tetromino;
use crate::settings::TetrisSettings;
use crate::stage::Stage;
use crate::types::{palette, BlockDraw, Cell, Rgb};

/// Produces a host texture for one block look.
pub trait TextureSource {
    type Texture;

    fn render_block(&mut self, draw: &BlockDraw) -> Self::Texture;
}

/// Per-session cache of rendered block textures, keyed by fill color.
pub struct TextureCache<S: TextureSource> {
    source: S,
    textures: HashMap<Rgb, S::Texture>,
}

impl<S: TextureSource> TextureCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            textures: HashMap::new(),
        }
    }

    /// Texture for `draw`, rendering it on first use of its fill color.
    pub fn texture(&mut self, draw: &BlockDraw) -> &S::Texture {
        let source = &mut self.source;
        self.textures
            .entry(draw.fill)
            .or_insert_with(|| source.render_block(draw))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Diffing painter for one stage.
#[derive(Debug, Clone)]
pub struct StagePainter {
    width: i32,
    square_size: u32,
    border_width: f32,
    /// Look of each cell at the last paint; `None` until first painted
    painted: Vec<Option<Cell>>,
}

impl StagePainter {
    pub fn new(settings: &TetrisSettings) -> Self {
        let area = settings.board_size().area();
        Self {
            width: settings.width.max(0),
            square_size: settings.square_size,
            border_width: settings.border_width,
            painted: vec![None; area],
        }
    }

    /// Forget the last paint so the next one redraws every cell.
    pub fn invalidate(&mut self) {
        self.painted.fill(None);
    }

    /// Draw requests for every cell whose look changed since the last paint.
    ///
    /// Cells are visited row by row, top to bottom.
    pub fn paint(&mut self, stage: &Stage, active: Option<&Tetromino>) -> Vec<BlockDraw> {
        let mut visible: Vec<Cell> = stage.cells().to_vec();
        if let Some(piece) = active {
            for (x, y) in piece.blocks() {
                if x >= 0 && x < stage.width() && y >= 0 && y < stage.height() {
                    visible[(y * stage.width() + x) as usize] = Some(piece.kind);
                }
            }
        }

        let mut draws = Vec::new();
        let count = visible.len().min(self.painted.len());
        for (idx, cell) in visible.iter().take(count).enumerate() {
            if self.painted[idx] == Some(*cell) {
                continue;
            }
            self.painted[idx] = Some(*cell);
            let x = idx as i32 % self.width;
            let y = idx as i32 / self.width;
            draws.push(self.block(x, y, *cell));
        }
        draws
    }

    fn block(&self, x: i32, y: i32, cell: Cell) -> BlockDraw {
        let (fill, border) = match cell {
            Some(kind) => (kind.color(), palette::TETRIS_BLOCK_BORDER),
            None => (palette::TETRIS_BACKGROUND, palette::TETRIS_GRID),
        };
        BlockDraw {
            x: x as u32 * self.square_size,
            y: y as u32 * self.square_size,
            width: self.square_size,
            height: self.square_size,
            fill,
            border,
            border_width: self.border_width,
        }
    }
}
