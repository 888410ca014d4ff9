//! GameView: turns the cores' draw requests into a terminal framebuffer.
//!
//! The board is kept as its own layer and updated incrementally: Tetris
//! block draws and Snake dirty tiles only touch the cells they name. Every
//! frame then composes that layer with a border, the HUD panel and a state
//! overlay. This module is pure (no I/O).

use crate::core::{TextureCache, TextureSource, Tile};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{palette, BlockDraw, PieceKind, PlayState, Position, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Block "textures" for a terminal: one styled glyph per fill color.
#[derive(Debug, Clone, Copy)]
pub struct BlockGlyphs {
    background: Rgb,
}

impl BlockGlyphs {
    pub fn new(background: Rgb) -> Self {
        Self { background }
    }
}

impl TextureSource for BlockGlyphs {
    type Texture = Cell;

    fn render_block(&mut self, draw: &BlockDraw) -> Cell {
        if draw.fill == self.background {
            CellStyle::new(draw.border, draw.fill).dim().cell('·')
        } else {
            CellStyle::new(draw.fill, self.background).bold().cell('█')
        }
    }
}

/// Side panel contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub title: &'static str,
    pub score: u32,
    pub best: u32,
    pub level: Option<u32>,
    pub lines: Option<u32>,
    pub next: Option<PieceKind>,
    pub state: PlayState,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    board: FrameBuffer,
    blocks: TextureCache<BlockGlyphs>,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            board: FrameBuffer::new(0, 0),
            blocks: TextureCache::new(BlockGlyphs::new(palette::TETRIS_BACKGROUND)),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size the board layer for a `cols` x `rows` grid.
    pub fn set_board_size(&mut self, cols: u16, rows: u16) {
        let width = cols.saturating_mul(self.cell_w);
        let height = rows.saturating_mul(self.cell_h);
        if self.board.width() != width || self.board.height() != height {
            self.board.resize(width, height);
            self.board.clear(Cell::default());
        }
    }

    pub fn board_layer(&self) -> &FrameBuffer {
        &self.board
    }

    /// Apply Tetris block draws; pixel coordinates are divided by `square_size`.
    pub fn apply_blocks(&mut self, draws: &[BlockDraw], square_size: u32) {
        let square = square_size.max(1);
        for draw in draws {
            let col = (draw.x / square).min(u16::MAX as u32) as u16;
            let row = (draw.y / square).min(u16::MAX as u32) as u16;
            let cell = *self.blocks.texture(draw);
            self.fill_board_cell(col, row, cell);
        }
    }

    /// Apply Snake tiles. With `grid`, empty tiles show a grid dot.
    pub fn apply_tiles(&mut self, tiles: &[(Position, Tile)], grid: bool) {
        for (pos, tile) in tiles {
            if pos.row < 0 || pos.col < 0 {
                continue;
            }
            let color = tile.color();
            let cell = if grid && !tile.is_snake {
                CellStyle::new(palette::SNAKE_GRID, color).cell('·')
            } else {
                CellStyle::new(color, color).cell(' ')
            };
            self.fill_board_cell(pos.col as u16, pos.row as u16, cell);
        }
    }

    fn fill_board_cell(&mut self, col: u16, row: u16, cell: Cell) {
        self.board.fill_rect(
            col.saturating_mul(self.cell_w),
            row.saturating_mul(self.cell_h),
            self.cell_w,
            self.cell_h,
            cell,
        );
    }

    /// Compose the board layer, HUD and overlay into `fb`.
    pub fn render_into(&self, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame_w = self.board.width().saturating_add(2);
        let frame_h = self.board.height().saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w + HUD_WIDTH) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        draw_border(fb, start_x, start_y, frame_w, frame_h, CellStyle::default());
        fb.blit(start_x + 1, start_y + 1, &self.board);

        draw_side_panel(fb, hud, start_x.saturating_add(frame_w).saturating_add(2), start_y);

        let overlay = match hud.state {
            PlayState::Idle => Some("PRESS ENTER"),
            PlayState::Paused => Some("PAUSED"),
            PlayState::GameOver => Some("GAME OVER"),
            PlayState::Running => None,
        };
        if let Some(text) = overlay {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let y = start_y.saturating_add(frame_h / 2);
            fb.put_str(x, y, text, CellStyle::default().bold());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(hud, viewport, &mut fb);
        fb
    }
}

const HUD_WIDTH: u16 = 14;

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    fb.set(x, y, style.cell('┌'));
    fb.set(x + w - 1, y, style.cell('┐'));
    fb.set(x, y + h - 1, style.cell('└'));
    fb.set(x + w - 1, y + h - 1, style.cell('┘'));
    for dx in 1..w - 1 {
        fb.set(x + dx, y, style.cell('─'));
        fb.set(x + dx, y + h - 1, style.cell('─'));
    }
    for dy in 1..h - 1 {
        fb.set(x, y + dy, style.cell('│'));
        fb.set(x + w - 1, y + dy, style.cell('│'));
    }
}

fn draw_side_panel(fb: &mut FrameBuffer, hud: &Hud, x: u16, y: u16) {
    if x >= fb.width() {
        return;
    }
    let label = CellStyle::default().bold();
    let value = CellStyle::default();

    let mut y = y;
    fb.put_str(x, y, hud.title, label);
    y = y.saturating_add(2);

    let mut row = |fb: &mut FrameBuffer, name: &str, v: u32| {
        fb.put_str(x, y, name, label);
        fb.put_u32(x, y.saturating_add(1), v, value);
        y = y.saturating_add(3);
    };
    row(fb, "SCORE", hud.score);
    row(fb, "BEST", hud.best);
    if let Some(level) = hud.level {
        row(fb, "LEVEL", level);
    }
    if let Some(lines) = hud.lines {
        row(fb, "LINES", lines);
    }

    if let Some(next) = hud.next {
        fb.put_str(x, y, "NEXT", label);
        let style = CellStyle::new(next.color(), Rgb::default()).bold();
        fb.put_str(x, y.saturating_add(1), piece_letter(next), style);
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::J => "J",
        PieceKind::L => "L",
        PieceKind::O => "O",
        PieceKind::S => "S",
        PieceKind::T => "T",
        PieceKind::Z => "Z",
    }
}
