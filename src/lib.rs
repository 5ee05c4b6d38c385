//! Apple Container (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `apple_container::{core,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use apple_container_core as core;
pub use apple_container_input as input;
pub use apple_container_term as term;
pub use apple_container_types as types;
