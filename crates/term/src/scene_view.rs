//! SceneView: rasterizes a core [`Scene`] into a terminal framebuffer.
//!
//! The terminal stands in for a window of `cols * CELL_PX_WIDTH` by
//! `rows * CELL_PX_HEIGHT` pixels, so the same `CoordinateMapper` that maps the
//! mouse also places every shape. This module is pure (no I/O).

use crate::core::{Align, CoordinateMapper, DrawCommand, Scene, Text, TextSize};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Rect, APPLE_HALF_EXTENT_RATIO, CELL_PX_HEIGHT, CELL_PX_WIDTH};

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

    /// Mapper for the pixel window this viewport pretends to be.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(
            u32::from(self.width) * CELL_PX_WIDTH,
            u32::from(self.height) * CELL_PX_HEIGHT,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: CellStyle,
    pub border: CellStyle,
    pub panel: CellStyle,
    pub button: CellStyle,
    pub button_hover: CellStyle,
    pub text: CellStyle,
    pub apple: CellStyle,
    pub apple_selected: CellStyle,
    pub apple_popped: CellStyle,
    pub selection: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        let black = Rgb::new(0, 0, 0);
        let field = Rgb::new(24, 48, 28);
        Self {
            background: CellStyle::new(Rgb::new(220, 220, 220), black),
            border: CellStyle::new(Rgb::new(170, 170, 170), black),
            panel: CellStyle::new(Rgb::new(90, 120, 90), field),
            button: CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(50, 50, 70)),
            button_hover: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(90, 90, 140)).bold(),
            text: CellStyle::new(Rgb::new(230, 230, 230), black),
            apple: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 40, 40)).bold(),
            apple_selected: CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(250, 210, 60)).bold(),
            apple_popped: CellStyle::new(Rgb::new(255, 200, 200), Rgb::new(120, 30, 30)),
            selection: CellStyle::new(Rgb::new(120, 220, 255), field).bold(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneView {
    palette: Palette,
}

/// Half-open cell range covered by a logical rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl CellRect {
    fn mid(&self) -> (i32, i32) {
        ((self.x0 + self.x1 - 1) / 2, (self.y0 + self.y1 - 1) / 2)
    }
}

impl SceneView {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Render `scene` into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has reached the viewport size.
    pub fn render_into(&self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.palette.background);

        let mapper = viewport.mapper();
        if mapper.scale() == 0.0 {
            return;
        }
        let p = &self.palette;

        for cmd in scene.commands() {
            match *cmd {
                DrawCommand::Border(rect) => {
                    let r = cells(&mapper, rect);
                    fb.outline(r.x0, r.y0, r.x1, r.y1, p.border);
                }
                DrawCommand::Panel(rect) => {
                    let r = cells(&mapper, rect);
                    fb.fill(r.x0, r.y0, r.x1, r.y1, ' ', p.panel);
                }
                DrawCommand::Button {
                    rect,
                    label,
                    hovered,
                } => {
                    let style = if hovered { p.button_hover } else { p.button };
                    let r = cells(&mapper, rect);
                    fb.fill(r.x0, r.y0, r.x1, r.y1, ' ', style);
                    fb.outline(r.x0, r.y0, r.x1, r.y1, style);
                    let (cx, cy) = r.mid();
                    let len = label.chars().count() as i32;
                    fb.put_str(cx - len / 2, cy, label, style);
                }
                DrawCommand::Text(text) => self.draw_text(fb, &mapper, &text),
                DrawCommand::Apple {
                    x,
                    y,
                    size,
                    value,
                    selected,
                    popped,
                    ..
                } => {
                    let style = if popped {
                        p.apple_popped
                    } else if selected {
                        p.apple_selected
                    } else {
                        p.apple
                    };
                    let rect = Rect::centered(x, y, size * APPLE_HALF_EXTENT_RATIO);
                    let r = cells(&mapper, rect);
                    fb.fill(r.x0, r.y0, r.x1, r.y1, ' ', style);
                    let (cx, cy) = r.mid();
                    fb.set(cx, cy, char::from(b'0' + value), style);
                }
                DrawCommand::Selection { rect, sum } => {
                    let r = cells(&mapper, rect);
                    fb.outline(r.x0, r.y0, r.x1, r.y1, p.selection);
                    put_number(fb, r.x0 + 1, r.y0, u64::from(sum), p.selection);
                }
            }
        }
    }

    fn draw_text(&self, fb: &mut FrameBuffer, mapper: &CoordinateMapper, text: &Text) {
        let style = match text.size {
            TextSize::Small => self.palette.text.dim(),
            TextSize::Medium => self.palette.text,
            TextSize::Large => self.palette.text.bold(),
        };
        let (cx, cy) = cell_at(mapper, text.x, text.y);
        let width = text.label.chars().count() as i32 + text.value.map_or(0, digit_count);
        let x = match text.align {
            Align::Left => cx,
            Align::Center => cx - width / 2,
            Align::Right => cx - width,
        };
        let x = fb.put_str(x, cy, text.label, style);
        if let Some(value) = text.value {
            put_number(fb, x, cy, value, style);
        }
    }
}

fn cell_at(mapper: &CoordinateMapper, lx: f32, ly: f32) -> (i32, i32) {
    let (px, py) = mapper.to_physical(lx, ly);
    (
        (px / CELL_PX_WIDTH as f32).floor() as i32,
        (py / CELL_PX_HEIGHT as f32).floor() as i32,
    )
}

/// Cells touched by `rect`; never empty, so tiny shapes still show up.
fn cells(mapper: &CoordinateMapper, rect: Rect) -> CellRect {
    let (x0, y0) = cell_at(mapper, rect.left, rect.top);
    let (x1, y1) = cell_at(mapper, rect.right, rect.bottom);
    CellRect {
        x0,
        y0,
        x1: x1.max(x0 + 1),
        y1: y1.max(y0 + 1),
    }
}

fn digit_count(value: u64) -> i32 {
    let mut n = 1;
    let mut v = value;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}

fn put_number(fb: &mut FrameBuffer, x: i32, y: i32, value: u64, style: CellStyle) {
    let n = digit_count(value);
    let mut v = value;
    for i in (0..n).rev() {
        fb.set(x + i, y, char::from(b'0' + (v % 10) as u8), style);
        v /= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_helpers() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(120), 3);

        let mut fb = FrameBuffer::new(6, 1);
        put_number(&mut fb, 1, 0, 305, CellStyle::default());
        let row: String = fb.row(0).iter().map(|c| c.ch).collect();
        assert_eq!(row, " 305  ");
    }

    #[test]
    fn test_cells_never_empty() {
        let mapper = Viewport::new(80, 24).mapper();
        let r = cells(&mapper, Rect::new(100.0, 100.0, 101.0, 101.0));
        assert_eq!(r.x1 - r.x0, 1);
        assert_eq!(r.y1 - r.y0, 1);
    }

    #[test]
    fn test_zero_sized_viewport_draws_nothing() {
        let scene = Scene::new();
        let mut fb = FrameBuffer::new(4, 4);
        SceneView::default().render_into(&scene, Viewport::new(0, 0), &mut fb);
        assert!(fb.cells().is_empty());
    }
}
