//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules, board state and the match
//! controller. It has **no dependencies** on terminals, sockets or files:
//!
//! - **Deterministic**: the same seed produces the same bag order and garbage holes
//! - **Synchronous**: every operation completes before returning; time is
//!   passed in as a millisecond timestamp
//! - **Infallible**: illegal requests are rejected as `false` / `None` no-ops
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 locked-cell matrix, collision, line clearing, garbage rows
//! - [`pieces`]: the seven shapes, matrix rotation and horizontal kicks
//! - [`bag`]: 7-bag piece generator
//! - [`scoring`]: line score, garbage yield, level and drop interval
//! - [`garbage`]: pending-garbage counter and row insertion
//! - [`drop_clock`]: automatic descent timing
//! - [`board`]: one player's session (lock cycle, win/loss)
//! - [`controller`]: solo and versus matches, garbage routing, pause
//! - [`report`]: the [`ScoreSink`] seam for final scores
//! - [`snapshot`]: copies of board and match state for rendering
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{Match, MatchConfig};
//! use tetris_duel_core::types::{GameAction, PlayerSlot};
//!
//! let mut game = Match::solo(MatchConfig::solo().with_seed(12345));
//! game.start();
//!
//! game.apply_action(PlayerSlot::One, GameAction::MoveRight);
//! game.apply_action(PlayerSlot::One, GameAction::Rotate);
//! while game.apply_action(PlayerSlot::One, GameAction::Drop) {
//!     if !game.take_events().is_empty() {
//!         break;
//!     }
//! }
//!
//! assert_eq!(game.boards()[0].pieces_spawned(), 2);
//! ```
//!
//! # Timing
//!
//! The host calls [`Match::tick`] with a monotonic clock in milliseconds,
//! typically every 16ms. A board descends one row once more than its drop
//! interval has elapsed (1000ms at level 0, 100ms less per level, 100ms floor).

pub mod bag;
pub mod board;
pub mod controller;
pub mod drop_clock;
pub mod garbage;
pub mod grid;
pub mod pieces;
pub mod report;
pub mod scoring;
pub mod snapshot;

pub use tetris_duel_types as types;

// Re-export commonly used types for convenience
pub use bag::Bag;
pub use board::{Board, BoardConfig, BoardId, DropResult, LockEvent};
pub use controller::{Match, MatchConfig, MatchEvent, MatchMode};
pub use drop_clock::{DropClock, DropEvent};
pub use garbage::{apply_garbage, GarbageQueue};
pub use grid::{Grid, Row};
pub use pieces::{get_shape, try_rotate, Piece, Shape};
pub use report::{NullSink, RecordingSink, ScoreSink};
pub use scoring::{calculate_level, calculate_score, get_drop_interval_ms, ScoreResult};
pub use snapshot::{BoardSnapshot, MatchSnapshot};
