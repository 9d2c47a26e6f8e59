/// Character-cell frame buffer.
///
/// Cells hold a glyph plus a foreground/background pair from the classic
/// 16-colour console palette. The buffer knows nothing about terminals;
/// front-ends read [`FrameBuffer::cells`] row by row when presenting.

use crate::raster::{self, Surface};

/// Full block.
pub const GLYPH_SOLID: char = '\u{2588}';
/// Dark shade.
pub const GLYPH_THREE_QUARTERS: char = '\u{2593}';
/// Medium shade.
pub const GLYPH_HALF: char = '\u{2592}';
/// Light shade.
pub const GLYPH_QUARTER: char = '\u{2591}';

/// 16-colour console palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Grey,
    DarkGrey,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

/// Foreground and background colour of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attr {
    pub fg: Color,
    pub bg: Color,
}

impl Attr {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::new(Color::White, Color::Black)
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub attr: Attr,
}

impl Cell {
    pub const fn new(glyph: char, attr: Attr) -> Self {
        Self { glyph, attr }
    }

    /// Black space, what a cleared frame is filled with.
    pub const fn blank() -> Self {
        Self::new(' ', Attr::new(Color::Black, Color::Black))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// 2D grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`, or `None` past the bottom edge.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * usize::from(self.width);
        Some(&self.cells[start..start + usize::from(self.width)])
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= usize::from(self.width) || y >= usize::from(self.height) {
            return None;
        }
        Some(y * usize::from(self.width) + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Coordinates outside the buffer are ignored.
    pub fn draw(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, cell: Cell) {
        raster::draw_line(self, x1, y1, x2, y2, cell);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32, cell: Cell) {
        raster::draw_triangle(self, [(x1, y1), (x2, y2), (x3, y3)], cell);
    }

    pub fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, cell: Cell) {
        raster::fill(self, x1, y1, x2, y2, cell);
    }

    /// Write a string left to right from `(x, y)`, clipped at the right edge.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, attr: Attr) {
        for (offset, glyph) in (0..).zip(s.chars()) {
            self.draw(x.saturating_add(offset), y, Cell::new(glyph, attr));
        }
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn draw(&mut self, x: i32, y: i32, cell: Cell) {
        FrameBuffer::draw(self, x, y, cell);
    }
}
