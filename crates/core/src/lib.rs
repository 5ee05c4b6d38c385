//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a round of "sum to ten" without a window: board
//! generation, apple physics, drag selection, the round clock and the mode
//! state machine. No module here touches a terminal, a clock or the OS.
//!
//! # Module Structure
//!
//! - [`rng`]: seeded LCG shared by generation and physics
//! - [`apple`]: one apple, its kinematics and its pop animation
//! - [`board`]: the apple grid, layout inside the play area and ten-sum fix-up
//! - [`selection`]: drag rectangle, live sum and commit rule
//! - [`session`]: one timed round (board, score, clock)
//! - [`input`]: double-buffered key sampling with edge queries
//! - [`coords`]: logical canvas to window mapping
//! - [`controller`]: Title / MainMenu / HelpMenu / Playing state machine
//! - [`scene`]: draw commands for whatever renderer the host uses
//!
//! # Rules
//!
//! - A board holds `columns * rows` apples valued 1..=9 whose total is a
//!   multiple of 10
//! - Dragging a rectangle selects every apple whose hit box it touches
//! - Releasing pops the selection only when its values sum to exactly 10;
//!   each popped apple scores one point
//! - When the round clock runs out, selection stops and the score is final
//!
//! # Example
//!
//! ```
//! use apple_container_core::{Board, SimpleRng};
//!
//! let mut rng = SimpleRng::new(12345);
//! let board = Board::generate(17, 10, &mut rng);
//! assert_eq!(board.apples().len(), 170);
//! assert_eq!(board.value_sum() % 10, 0);
//! ```
//!
//! # Timing
//!
//! Every `tick` takes a monotonic millisecond timestamp from the caller. Physics
//! integrates over the delta since the previous tick, so frame rate only
//! affects smoothness.

pub mod apple;
pub mod board;
pub mod controller;
pub mod coords;
pub mod input;
pub mod rng;
pub mod scene;
pub mod selection;
pub mod session;

pub use apple_container_types as types;

pub use apple::{Apple, Kinematics};
pub use board::{fix_sum, Board};
pub use controller::{GameController, Signal};
pub use coords::{CoordinateMapper, Cursor};
pub use input::{InputSampler, KeyProbe};
pub use rng::SimpleRng;
pub use scene::{Align, DrawCommand, Scene, Text, TextSize};
pub use selection::{Popped, Selection};
pub use session::{RoundEvent, RoundSession};
