//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, scene building, terminal rendering).
//!
//! # Logical Canvas
//!
//! Game logic is authored against a fixed 1920x1080 virtual screen. Hosts map
//! it into their real window with a letterbox/pillarbox fit (see
//! `apple_container_core::coords`).
//!
//! - **Play area**: (400, 115) - (1840, 955); apples are laid out inside it
//! - **Despawn line**: popped apples stop animating once `y >= 1400`
//!
//! # Board Configuration
//!
//! | Field | Default | Range | Step |
//! |-------|---------|-------|------|
//! | `columns` | 17 | 4..=32 | 1 |
//! | `rows` | 10 | 4..=20 | 1 |
//! | `duration_secs` | 120 | 5..=900 | 5 |
//!
//! # Popped Apple Kinematics
//!
//! Drawn uniformly per apple at construction (logical px, seconds):
//!
//! | Parameter | Range |
//! |-----------|-------|
//! | `vel_x` | -300 .. 300 |
//! | `vel_y` | -900 .. -300 |
//! | `acc_y` | 1800 .. 2600 |
//! | `vel_angular` | -6 .. 6 rad/s |
//!
//! # Examples
//!
//! ```
//! use apple_container_types::{BoardConfig, ConfigField, Rect, PLAY_AREA};
//!
//! let mut config = BoardConfig::default();
//! assert_eq!((config.columns, config.rows, config.duration_secs), (17, 10, 120));
//!
//! config.adjust(ConfigField::Duration, true);
//! assert_eq!(config.duration_secs, 125);
//!
//! assert!(PLAY_AREA.contains(960.0, 540.0));
//! assert!(!PLAY_AREA.contains(100.0, 540.0));
//! assert_eq!(Rect::from_corners(5.0, 5.0, 1.0, 2.0), Rect::new(1.0, 2.0, 5.0, 5.0));
//! ```

/// Logical canvas width in px
pub const LOGICAL_WIDTH: f32 = 1920.0;

/// Logical canvas height in px
pub const LOGICAL_HEIGHT: f32 = 1080.0;

/// Rectangle the apple grid is laid out in
pub const PLAY_AREA: Rect = Rect::new(400.0, 115.0, 1840.0, 955.0);

/// Popped apples at or past this `y` are at rest off-screen
pub const DESPAWN_Y: f32 = 1400.0;

/// Apple values are drawn from `APPLE_VALUE_MIN..=APPLE_VALUE_MAX`
pub const APPLE_VALUE_MIN: u8 = 1;
pub const APPLE_VALUE_MAX: u8 = 9;

/// A selection must sum to exactly this to clear
pub const TARGET_SUM: u32 = 10;

/// Upper bound on apples cleared by one commit (ten apples of value 1)
pub const MAX_MATCH_APPLES: usize = TARGET_SUM as usize;

/// Iteration budget for the sum-fixing pass of board generation
pub const GENERATOR_ITERATION_LIMIT: u32 = 10_000;

/// Half-extent of an apple's drawn box, as a fraction of cell size
pub const APPLE_HALF_EXTENT_RATIO: f32 = 0.4;

/// Extra margin added to each side of the drawn box for hit-testing
pub const APPLE_HIT_MARGIN_RATIO: f32 = 0.05;

pub const VEL_X_RANGE: (f32, f32) = (-300.0, 300.0);
pub const VEL_Y_RANGE: (f32, f32) = (-900.0, -300.0);
pub const ACC_Y_RANGE: (f32, f32) = (1800.0, 2600.0);
pub const VEL_ANGULAR_RANGE: (f32, f32) = (-6.0, 6.0);

pub const COLUMNS_MIN: u32 = 4;
pub const COLUMNS_MAX: u32 = 32;
pub const ROWS_MIN: u32 = 4;
pub const ROWS_MAX: u32 = 20;
pub const DURATION_MIN_SECS: u32 = 5;
pub const DURATION_MAX_SECS: u32 = 900;

/// Increment used by the duration +/- buttons
pub const DURATION_STEP_SECS: u32 = 5;

/// Increment used by the column/row +/- buttons
pub const COUNT_STEP: u32 = 1;

/// Virtual-key code of the left mouse button
pub const KEY_MOUSE_LEFT: u8 = 0x01;

/// Virtual-key code of Escape
pub const KEY_ESCAPE: u8 = 0x1B;

/// Virtual-key code of `R` (board reset while playing)
pub const KEY_R: u8 = b'R';

/// Number of distinct key codes sampled per poll
pub const KEY_COUNT: usize = 256;

/// Pixel width assumed for one terminal cell when a terminal stands in for a window
pub const CELL_PX_WIDTH: u32 = 8;

/// Pixel height assumed for one terminal cell
pub const CELL_PX_HEIGHT: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sits_inside_bounds() {
        let config = BoardConfig::default();
        assert!(config.is_within_bounds());
        assert_eq!(config.columns, 17);
        assert_eq!(config.rows, 10);
        assert_eq!(config.duration_secs, 120);
    }

    #[test]
    fn adjust_clamps_at_both_ends() {
        let mut config = BoardConfig {
            columns: COLUMNS_MAX,
            rows: ROWS_MIN,
            duration_secs: DURATION_MAX_SECS,
        };
        assert!(!config.adjust(ConfigField::Columns, true));
        assert!(!config.adjust(ConfigField::Rows, false));
        assert!(!config.adjust(ConfigField::Duration, true));
        assert_eq!(config.columns, COLUMNS_MAX);
        assert_eq!(config.rows, ROWS_MIN);
        assert_eq!(config.duration_secs, DURATION_MAX_SECS);

        assert!(config.adjust(ConfigField::Duration, false));
        assert_eq!(config.duration_secs, DURATION_MAX_SECS - DURATION_STEP_SECS);
    }

    #[test]
    fn injected_out_of_range_config_is_detectable() {
        let config = BoardConfig {
            columns: 40,
            rows: 10,
            duration_secs: 120,
        };
        assert!(!config.is_within_bounds());
    }

    #[test]
    fn button_hover_is_edge_inclusive() {
        assert!(BUTTON_START.hover(720.0, 560.0));
        assert!(BUTTON_START.hover(1200.0, 700.0));
        assert!(!BUTTON_START.hover(1200.1, 700.0));
        assert_eq!(BUTTON_BACK.rect, BUTTON_HELP.rect);
    }
}

/// Axis-aligned rectangle in logical px (`left <= right`, `top <= bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Normalise two arbitrary corner points into a rectangle.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    /// Square of half-extent `half` centred on (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, half: f32) -> Self {
        Self::new(cx - half, cy - half, cx + half, cy + half)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Point containment, edges included
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Overlap test, touching edges count as overlapping
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Top-level game modes
///
/// The controller is always in exactly one of these. A round session exists
/// only while the mode is `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Title,
    MainMenu,
    HelpMenu,
    Playing,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Title => "title",
            GameMode::MainMenu => "mainMenu",
            GameMode::HelpMenu => "helpMenu",
            GameMode::Playing => "playing",
        }
    }
}

/// Round parameters chosen in the main menu
///
/// Only the bounded +/- steps of [`BoardConfig::adjust`] keep the fields in
/// range. Nothing re-validates a config on round start, so a hand-built
/// out-of-range value is used as-is; [`BoardConfig::is_within_bounds`] exists
/// for callers that want to detect that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardConfig {
    pub columns: u32,
    pub rows: u32,
    pub duration_secs: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 17,
            rows: 10,
            duration_secs: 120,
        }
    }
}

/// One adjustable field of [`BoardConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Columns,
    Rows,
    Duration,
}

impl ConfigField {
    pub const ALL: [ConfigField; 3] = [ConfigField::Columns, ConfigField::Rows, ConfigField::Duration];

    /// (min, max, step) for this field
    pub fn bounds(&self) -> (u32, u32, u32) {
        match self {
            ConfigField::Columns => (COLUMNS_MIN, COLUMNS_MAX, COUNT_STEP),
            ConfigField::Rows => (ROWS_MIN, ROWS_MAX, COUNT_STEP),
            ConfigField::Duration => (DURATION_MIN_SECS, DURATION_MAX_SECS, DURATION_STEP_SECS),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::Columns => "Columns",
            ConfigField::Rows => "Rows",
            ConfigField::Duration => "Time (s)",
        }
    }
}

impl BoardConfig {
    pub fn get(&self, field: ConfigField) -> u32 {
        match field {
            ConfigField::Columns => self.columns,
            ConfigField::Rows => self.rows,
            ConfigField::Duration => self.duration_secs,
        }
    }

    /// Step one field up or down, saturating at its bounds.
    ///
    /// Returns false if the field was already at the bound.
    pub fn adjust(&mut self, field: ConfigField, increase: bool) -> bool {
        let (min, max, step) = field.bounds();
        let current = self.get(field);
        let next = if increase {
            current.saturating_add(step).min(max)
        } else {
            current.saturating_sub(step).max(min)
        };

        let slot = match field {
            ConfigField::Columns => &mut self.columns,
            ConfigField::Rows => &mut self.rows,
            ConfigField::Duration => &mut self.duration_secs,
        };
        *slot = next;
        next != current
    }

    pub fn is_within_bounds(&self) -> bool {
        ConfigField::ALL.iter().all(|field| {
            let (min, max, _) = field.bounds();
            (min..=max).contains(&self.get(*field))
        })
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn duration_ms(&self) -> u64 {
        u64::from(self.duration_secs) * 1000
    }
}

/// A clickable rectangle with a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
}

impl Button {
    pub const fn new(label: &'static str, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            label,
            rect: Rect::new(left, top, right, bottom),
        }
    }

    pub fn hover(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }
}

pub const BUTTON_START: Button = Button::new("Start", 720.0, 560.0, 1200.0, 700.0);
pub const BUTTON_HELP: Button = Button::new("Help", 720.0, 800.0, 1200.0, 940.0);
pub const BUTTON_BACK: Button = Button::new("Back", 720.0, 800.0, 1200.0, 940.0);
pub const BUTTON_MENU_RESET: Button = Button::new("Reset", 1320.0, 560.0, 1800.0, 700.0);
pub const BUTTON_GAME_MENU: Button = Button::new("Menu", 40.0, 115.0, 360.0, 235.0);
pub const BUTTON_GAME_RESET: Button = Button::new("Reset", 40.0, 275.0, 360.0, 395.0);

/// Top of the first settings row; rows are `SETTING_ROW_PITCH` apart.
const SETTING_ROW_TOP: f32 = 150.0;
const SETTING_ROW_PITCH: f32 = 120.0;
const SETTING_ROW_HEIGHT: f32 = 90.0;

/// Index of a field's row in the settings block
fn setting_row(field: ConfigField) -> f32 {
    match field {
        ConfigField::Columns => 0.0,
        ConfigField::Rows => 1.0,
        ConfigField::Duration => 2.0,
    }
}

/// The "-" and "+" buttons for one settings row.
pub fn setting_buttons(field: ConfigField) -> (Button, Button) {
    let top = SETTING_ROW_TOP + setting_row(field) * SETTING_ROW_PITCH;
    let bottom = top + SETTING_ROW_HEIGHT;
    (
        Button::new("-", 1080.0, top, 1180.0, bottom),
        Button::new("+", 1420.0, top, 1520.0, bottom),
    )
}

/// Vertical centre of one settings row (for labels and values).
pub fn setting_row_center_y(field: ConfigField) -> f32 {
    SETTING_ROW_TOP + setting_row(field) * SETTING_ROW_PITCH + SETTING_ROW_HEIGHT / 2.0
}
