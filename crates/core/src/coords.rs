//! Coordinate mapping between the logical canvas and the real window
//!
//! The 1920x1080 canvas is scaled uniformly to fit inside the window and
//! centred (letterbox/pillarbox). The inverse mapping does not clamp: a cursor
//! in the bars maps outside the canvas, which callers treat as "no hit".

use crate::types::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Scale and centring offsets for one window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    window_w: f32,
    window_h: f32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CoordinateMapper {
    pub fn new(window_w: u32, window_h: u32) -> Self {
        let w = window_w as f32;
        let h = window_h as f32;

        let scale = if window_w == 0 || window_h == 0 {
            0.0
        } else if w / h > LOGICAL_WIDTH / LOGICAL_HEIGHT {
            h / LOGICAL_HEIGHT
        } else {
            w / LOGICAL_WIDTH
        };

        Self {
            window_w: w,
            window_h: h,
            scale,
            offset_x: (w - LOGICAL_WIDTH * scale) / 2.0,
            offset_y: (h - LOGICAL_HEIGHT * scale) / 2.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn window_size(&self) -> (f32, f32) {
        (self.window_w, self.window_h)
    }

    /// Map a physical (window px) point into logical canvas coordinates.
    ///
    /// A zero-area window has no canvas; every point maps far outside it.
    pub fn to_logical(&self, physical_x: f32, physical_y: f32) -> (f32, f32) {
        if self.scale == 0.0 {
            return (f32::NEG_INFINITY, f32::NEG_INFINITY);
        }
        (
            (physical_x - self.window_w / 2.0) / self.scale + LOGICAL_WIDTH / 2.0,
            (physical_y - self.window_h / 2.0) / self.scale + LOGICAL_HEIGHT / 2.0,
        )
    }

    /// Map a logical point into window px.
    pub fn to_physical(&self, logical_x: f32, logical_y: f32) -> (f32, f32) {
        (
            logical_x * self.scale + self.offset_x,
            logical_y * self.scale + self.offset_y,
        )
    }
}

/// Cursor position in both spaces, refreshed every frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub physical_x: f32,
    pub physical_y: f32,
    pub logical_x: f32,
    pub logical_y: f32,
}

impl Cursor {
    pub fn from_physical(mapper: &CoordinateMapper, x: f32, y: f32) -> Self {
        let (logical_x, logical_y) = mapper.to_logical(x, y);
        Self {
            physical_x: x,
            physical_y: y,
            logical_x,
            logical_y,
        }
    }

    /// Whether the cursor lies on the logical canvas.
    pub fn on_canvas(&self) -> bool {
        (0.0..=LOGICAL_WIDTH).contains(&self.logical_x)
            && (0.0..=LOGICAL_HEIGHT).contains(&self.logical_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_size_is_identity() {
        let m = CoordinateMapper::new(1920, 1080);
        assert_eq!(m.scale(), 1.0);
        assert_eq!(m.offset(), (0.0, 0.0));
        assert_eq!(m.to_logical(100.0, 200.0), (100.0, 200.0));
    }

    #[test]
    fn test_ultra_wide_pillarboxes() {
        let m = CoordinateMapper::new(3840, 1080);
        assert_eq!(m.scale(), 1.0);
        assert_eq!(m.offset(), (960.0, 0.0));
        assert_eq!(m.to_logical(960.0, 0.0), (0.0, 0.0));
        assert_eq!(m.to_physical(1920.0, 1080.0), (2880.0, 1080.0));
    }

    #[test]
    fn test_tall_window_letterboxes() {
        let m = CoordinateMapper::new(960, 1080);
        assert_eq!(m.scale(), 0.5);
        assert_eq!(m.offset(), (0.0, 270.0));
        assert_eq!(m.to_logical(480.0, 540.0), (960.0, 540.0));
    }

    #[test]
    fn test_bars_map_outside_canvas() {
        let m = CoordinateMapper::new(3840, 1080);
        let c = Cursor::from_physical(&m, 10.0, 500.0);
        assert!(c.logical_x < 0.0);
        assert!(!c.on_canvas());
    }

    #[test]
    fn test_zero_area_window_is_no_hit() {
        let m = CoordinateMapper::new(0, 600);
        assert_eq!(m.scale(), 0.0);
        let c = Cursor::from_physical(&m, 0.0, 0.0);
        assert!(!c.on_canvas());
    }

    #[test]
    fn test_round_trip_through_physical() {
        let m = CoordinateMapper::new(1280, 1024);
        let (px, py) = m.to_physical(400.0, 300.0);
        let (lx, ly) = m.to_logical(px, py);
        assert!((lx - 400.0).abs() < 1e-3);
        assert!((ly - 300.0).abs() < 1e-3);
    }
}
