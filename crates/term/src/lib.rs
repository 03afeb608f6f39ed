//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the match snapshot is drawn into a
//! framebuffer of styled cells, which the renderer diffs and flushes to the
//! terminal through crossterm.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: one or two boards with panels and overlays (pure, testable)
//! - [`renderer`]: raw-mode terminal output with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_duel_core as core;
pub use tetris_duel_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
