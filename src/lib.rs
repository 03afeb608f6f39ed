//! Tetris Duel (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benchmarks can use `tetris_duel::{core,input,scores,term,types}`.

pub mod logging;

pub use tetris_duel_core as core;
pub use tetris_duel_input as input;
pub use tetris_duel_scores as scores;
pub use tetris_duel_term as term;
pub use tetris_duel_types as types;
