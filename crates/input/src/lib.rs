//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into `(PlayerSlot, GameAction)` pairs for the
//! solo and versus keyboard layouts. The engine never sees raw key events.

pub mod map;

pub use tetris_duel_types as types;

pub use map::{handle_key_event, should_quit, KeyLayout};
