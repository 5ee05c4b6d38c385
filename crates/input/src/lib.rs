//! Terminal input module (host-facing).
//!
//! Turns `crossterm` key and mouse events into the virtual-key table that the
//! core's `InputSampler` polls. Works on terminals without key-release events.

pub mod handler;
pub mod map;

pub use apple_container_core as core;
pub use apple_container_types as types;

pub use handler::{Feed, TermInput};
pub use map::{key_code, should_quit};
