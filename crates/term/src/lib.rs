//! Terminal "game renderer" module.
//!
//! Draws the core's renderer-agnostic [`Scene`](crate::core::Scene) into a
//! framebuffer of styled cells and flushes it to a real terminal. No ratatui
//! widgets or layout; the logical canvas is letterboxed into the terminal with
//! the same mapper the mouse uses.

pub mod fb;
pub mod renderer;
pub mod scene_view;

pub use apple_container_core as core;
pub use apple_container_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_runs, encode_full_into, encode_runs_into, Run, Screen};
pub use scene_view::{Palette, SceneView, Viewport};
