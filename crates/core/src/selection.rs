//! Selection module - drag rectangle hit-testing and the match commit
//!
//! A drag starts at an anchor inside the play area. While the button is held,
//! [`Selection::update`] rebuilds the selection from scratch every tick. On
//! release, [`Selection::commit`] pops the selected apples only if their values
//! sum to exactly [`TARGET_SUM`]. Nothing on the board changes before the
//! commit, so a failed commit has nothing to roll back.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Rect, MAX_MATCH_APPLES, PLAY_AREA, TARGET_SUM};

/// Indices (row-major) of the apples cleared by one commit
pub type Popped = ArrayVec<usize, MAX_MATCH_APPLES>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    anchor_x: f32,
    anchor_y: f32,
    cursor_x: f32,
    cursor_y: f32,
}

/// Drag state plus the running sum of the current selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    drag: Option<Drag>,
    sum: u32,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Sum of the currently selected values
    pub fn sum(&self) -> u32 {
        self.sum
    }

    pub fn anchor(&self) -> Option<(f32, f32)> {
        self.drag.map(|d| (d.anchor_x, d.anchor_y))
    }

    /// Rectangle spanned by the anchor and the last seen cursor.
    pub fn rect(&self) -> Option<Rect> {
        self.drag
            .map(|d| Rect::from_corners(d.anchor_x, d.anchor_y, d.cursor_x, d.cursor_y))
    }

    /// Start a drag at (`x`, `y`).
    ///
    /// Returns false (and does nothing) if the point is outside the play area
    /// or a drag is already running.
    pub fn begin(&mut self, x: f32, y: f32) -> bool {
        if self.drag.is_some() || !PLAY_AREA.contains(x, y) {
            return false;
        }
        self.drag = Some(Drag {
            anchor_x: x,
            anchor_y: y,
            cursor_x: x,
            cursor_y: y,
        });
        self.sum = 0;
        true
    }

    /// Re-select every unpopped apple whose hit box touches the drag rectangle.
    pub fn update(&mut self, board: &mut Board, x: f32, y: f32) -> u32 {
        let Some(drag) = self.drag.as_mut() else {
            return 0;
        };
        drag.cursor_x = x;
        drag.cursor_y = y;
        let rect = Rect::from_corners(drag.anchor_x, drag.anchor_y, x, y);

        let size = board.cell_size();
        let mut sum = 0;
        for apple in board.apples_mut() {
            apple.selected = !apple.popped() && apple.hit_box(size).intersects(&rect);
            if apple.selected {
                sum += u32::from(apple.value);
            }
        }
        self.sum = sum;
        sum
    }

    /// Finish the drag.
    ///
    /// Pops the selected apples if they sum to exactly ten and returns their
    /// indices; any other sum pops nothing. Selection flags are cleared and the
    /// drag ends either way.
    pub fn commit(&mut self, board: &mut Board) -> Option<Popped> {
        if self.drag.is_none() {
            return None;
        }

        let matched = self.sum == TARGET_SUM;
        let mut popped = Popped::new();
        for (i, apple) in board.apples_mut().iter_mut().enumerate() {
            if matched && apple.selected {
                apple.pop();
                // A ten-sum holds at most ten apples.
                popped.push(i);
            }
            apple.selected = false;
        }

        self.drag = None;
        self.sum = 0;
        matched.then_some(popped)
    }

    /// Abort the drag without popping anything.
    pub fn cancel(&mut self, board: &mut Board) {
        for apple in board.apples_mut() {
            apple.selected = false;
        }
        self.drag = None;
        self.sum = 0;
    }
}
