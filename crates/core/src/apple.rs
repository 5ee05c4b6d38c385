//! Apple token - one numbered cell on the board
//!
//! Every apple carries a latent fall trajectory drawn at construction. It only
//! becomes visible once the apple is popped; from then on [`Apple::animate`]
//! integrates it with explicit Euler steps until the apple drops past
//! [`DESPAWN_Y`].

use crate::rng::SimpleRng;
use crate::types::{
    Rect, ACC_Y_RANGE, APPLE_HALF_EXTENT_RATIO, APPLE_HIT_MARGIN_RATIO, DESPAWN_Y,
    VEL_ANGULAR_RANGE, VEL_X_RANGE, VEL_Y_RANGE,
};

/// Post-pop kinematics (logical px and seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub vel_x: f32,
    pub vel_y: f32,
    pub acc_y: f32,
    pub vel_angular: f32,
}

impl Kinematics {
    /// Draw a trajectory uniformly from the fixed ranges.
    pub fn random(rng: &mut SimpleRng) -> Self {
        Self {
            vel_x: rng.next_f32_in(VEL_X_RANGE),
            vel_y: rng.next_f32_in(VEL_Y_RANGE),
            acc_y: rng.next_f32_in(ACC_Y_RANGE),
            vel_angular: rng.next_f32_in(VEL_ANGULAR_RANGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apple {
    pub value: u8,
    popped: bool,
    pub(crate) selected: bool,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub kinematics: Kinematics,
}

impl Apple {
    pub fn new(value: u8, x: f32, y: f32, kinematics: Kinematics) -> Self {
        Self {
            value,
            popped: false,
            selected: false,
            x,
            y,
            angle: 0.0,
            kinematics,
        }
    }

    pub fn popped(&self) -> bool {
        self.popped
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Mark the apple as cleared. Popping twice is a no-op.
    pub fn pop(&mut self) {
        self.popped = true;
        self.selected = false;
    }

    /// Whether the apple is still moving (popped and above the despawn line).
    pub fn is_falling(&self) -> bool {
        self.popped && self.y < DESPAWN_Y
    }

    /// Advance the fall by `delta_ms` using forward Euler.
    ///
    /// Position uses the velocity from the start of the step.
    pub fn animate(&mut self, delta_ms: u64) {
        if !self.is_falling() {
            return;
        }

        let dt = delta_ms as f32 / 1000.0;
        let k = &mut self.kinematics;
        self.x += k.vel_x * dt;
        self.y += k.vel_y * dt;
        k.vel_y += k.acc_y * dt;
        self.angle += k.vel_angular * dt;
    }

    /// Drawn box for a cell of size `size`.
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::centered(self.x, self.y, size * APPLE_HALF_EXTENT_RATIO)
    }

    /// Drawn box inflated by the hit margin.
    pub fn hit_box(&self, size: f32) -> Rect {
        Rect::centered(
            self.x,
            self.y,
            size * (APPLE_HALF_EXTENT_RATIO + APPLE_HIT_MARGIN_RATIO),
        )
    }
}
