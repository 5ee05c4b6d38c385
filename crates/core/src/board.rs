//! Board module - the apple grid and its generator
//!
//! The board is a `columns x rows` grid of [`Apple`]s stored row-major in a
//! flat vector. Dimensions are fixed for the lifetime of a round.
//! Coordinates: (col, row) where col ranges 0..columns (left to right) and
//! row ranges 0..rows (top to bottom).
//!
//! Generation draws every value uniformly from 1..=9, then walks random cells
//! decrementing values > 1 until the total is a multiple of ten. The walk is
//! capped at [`GENERATOR_ITERATION_LIMIT`] iterations; a board made entirely of
//! ones can never be fixed, so the cap can leave a non-divisible sum.

use log::{debug, warn};

use crate::apple::{Apple, Kinematics};
use crate::rng::SimpleRng;
use crate::types::{
    Rect, APPLE_VALUE_MAX, APPLE_VALUE_MIN, GENERATOR_ITERATION_LIMIT, PLAY_AREA, TARGET_SUM,
};

/// The apple grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: u32,
    rows: u32,
    /// Edge length of one grid cell in logical px
    cell_size: f32,
    /// Flat array of apples, row-major order (row * columns + col)
    apples: Vec<Apple>,
}

impl Board {
    /// Generate a new board whose value sum is (normally) a multiple of ten.
    pub fn generate(columns: u32, rows: u32, rng: &mut SimpleRng) -> Self {
        let mut values: Vec<u8> = (0..columns * rows)
            .map(|_| rng.next_between(APPLE_VALUE_MIN as u32, APPLE_VALUE_MAX as u32) as u8)
            .collect();

        if !fix_sum(&mut values, rng) {
            let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
            warn!(
                "board {}x{} left with sum {} after {} iterations",
                columns, rows, sum, GENERATOR_ITERATION_LIMIT
            );
        }

        let board = Self::from_values(columns, rows, &values, rng);
        debug!(
            "generated {}x{} board, sum {}",
            columns,
            rows,
            board.value_sum()
        );
        board
    }

    /// Lay out the given values (row-major) and draw kinematics for each apple.
    ///
    /// `values.len()` must equal `columns * rows`.
    pub fn from_values(columns: u32, rows: u32, values: &[u8], rng: &mut SimpleRng) -> Self {
        assert_eq!(values.len(), (columns * rows) as usize);

        let cell_size = Self::cell_size_for(columns, rows);
        let origin_x = PLAY_AREA.left + (PLAY_AREA.width() - columns as f32 * cell_size) / 2.0;
        let origin_y = PLAY_AREA.top + (PLAY_AREA.height() - rows as f32 * cell_size) / 2.0;

        let apples = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let col = (i as u32 % columns) as f32;
                let row = (i as u32 / columns) as f32;
                Apple::new(
                    value,
                    origin_x + cell_size * (col + 0.5),
                    origin_y + cell_size * (row + 0.5),
                    Kinematics::random(rng),
                )
            })
            .collect();

        Self {
            columns,
            rows,
            cell_size,
            apples,
        }
    }

    /// Largest square cell that fits `columns x rows` into the play area.
    pub fn cell_size_for(columns: u32, rows: u32) -> f32 {
        let w = PLAY_AREA.width() / columns.max(1) as f32;
        let h = PLAY_AREA.height() / rows.max(1) as f32;
        w.min(h)
    }

    #[inline(always)]
    fn index(&self, col: u32, row: u32) -> Option<usize> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some((row * self.columns + col) as usize)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Get apple at (col, row); `None` if out of bounds
    pub fn get(&self, col: u32, row: u32) -> Option<&Apple> {
        self.index(col, row).map(|i| &self.apples[i])
    }

    pub fn get_mut(&mut self, col: u32, row: u32) -> Option<&mut Apple> {
        self.index(col, row).map(move |i| &mut self.apples[i])
    }

    pub fn apples(&self) -> &[Apple] {
        &self.apples
    }

    pub(crate) fn apples_mut(&mut self) -> &mut [Apple] {
        &mut self.apples
    }

    /// Sum of every apple value, popped or not.
    pub fn value_sum(&self) -> u32 {
        self.apples.iter().map(|a| u32::from(a.value)).sum()
    }

    /// Sum of the apples still on the board.
    pub fn remaining_sum(&self) -> u32 {
        self.apples
            .iter()
            .filter(|a| !a.popped())
            .map(|a| u32::from(a.value))
            .sum()
    }

    pub fn popped_count(&self) -> usize {
        self.apples.iter().filter(|a| a.popped()).count()
    }

    /// Bounding rectangle of the grid in logical px.
    pub fn grid_rect(&self) -> Rect {
        let w = self.columns as f32 * self.cell_size;
        let h = self.rows as f32 * self.cell_size;
        let left = PLAY_AREA.left + (PLAY_AREA.width() - w) / 2.0;
        let top = PLAY_AREA.top + (PLAY_AREA.height() - h) / 2.0;
        Rect::new(left, top, left + w, top + h)
    }

    /// Advance every popped apple's fall.
    pub fn animate(&mut self, delta_ms: u64) {
        for apple in &mut self.apples {
            apple.animate(delta_ms);
        }
    }
}

/// Decrement random cells until the total is a multiple of [`TARGET_SUM`].
///
/// Returns false if the iteration budget ran out first.
pub fn fix_sum(values: &mut [u8], rng: &mut SimpleRng) -> bool {
    if values.is_empty() {
        return true;
    }

    let mut sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    let mut iterations = 0;

    while sum % TARGET_SUM != 0 && iterations < GENERATOR_ITERATION_LIMIT {
        let i = rng.next_range(values.len() as u32) as usize;
        if values[i] > APPLE_VALUE_MIN {
            values[i] -= 1;
            sum -= 1;
        }
        iterations += 1;
    }

    sum % TARGET_SUM == 0
}
