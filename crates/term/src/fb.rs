//! Framebuffer of styled terminal cells.
//!
//! Drawing calls take signed coordinates and clip silently, so callers can hand
//! over shapes that hang off any edge of the terminal.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Glyphs for a single-line box.
const BOX: [char; 6] = ['┌', '┐', '└', '┘', '─', '│'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation when it is big enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as a slice, for run scanning.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.cells[start..start + w]
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    pub fn clear(&mut self, style: CellStyle) {
        self.cells.fill(Cell { ch: ' ', style });
    }

    /// Write `s` starting at `x`; returns the column after the last char.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) -> i32 {
        let mut cx = x;
        for ch in s.chars() {
            self.set(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Fill the half-open cell range `[x0, x1) x [y0, y1)`.
    pub fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ch: char, style: CellStyle) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i32::from(self.width));
        let y1 = y1.min(i32::from(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, ch, style);
            }
        }
    }

    /// Outline the half-open range with box-drawing glyphs.
    ///
    /// Ranges thinner than two cells collapse to a straight line.
    pub fn outline(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, style: CellStyle) {
        let [tl, tr, bl, br, h, v] = BOX;
        let (right, bottom) = (x1 - 1, y1 - 1);
        if right < x0 || bottom < y0 {
            return;
        }
        for x in x0..=right {
            self.set(x, y0, h, style);
            self.set(x, bottom, h, style);
        }
        for y in y0..=bottom {
            self.set(x0, y, v, style);
            self.set(right, y, v, style);
        }
        if right > x0 && bottom > y0 {
            self.set(x0, y0, tl, style);
            self.set(right, y0, tr, style);
            self.set(x0, bottom, bl, style);
            self.set(right, bottom, br, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_off_screen_are_clipped() {
        let mut fb = FrameBuffer::new(4, 2);
        let style = CellStyle::default();
        fb.set(-1, 0, 'x', style);
        fb.set(4, 1, 'x', style);
        assert_eq!(fb.put_str(2, 1, "abc", style), 5);
        assert_eq!(fb.get(2, 1).map(|c| c.ch), Some('a'));
        assert_eq!(fb.get(3, 1).map(|c| c.ch), Some('b'));
        assert!(fb.cells().iter().filter(|c| c.ch != ' ').count() == 2);
    }

    #[test]
    fn test_outline_corners() {
        let mut fb = FrameBuffer::new(5, 3);
        fb.outline(0, 0, 5, 3, CellStyle::default());
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(4, 2).map(|c| c.ch), Some('┘'));
        assert_eq!(fb.get(2, 0).map(|c| c.ch), Some('─'));
        assert_eq!(fb.get(0, 1).map(|c| c.ch), Some('│'));
        assert_eq!(fb.get(2, 1).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_resize_keeps_row_access_consistent() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.resize(6, 2);
        assert_eq!(fb.row(1).len(), 6);
        assert!(fb.row(2).is_empty());
    }
}
