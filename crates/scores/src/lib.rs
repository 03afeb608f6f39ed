//! Score persistence for tetris-duel
//!
//! - [`store`]: JSON-file score table with leaderboard queries
//! - [`server`]: blocking HTTP service over the store (`score-server` binary)
//! - [`client`]: async HTTP client for the service
//! - [`reporter`]: [`ScoreSink`](tetris_duel_core::ScoreSink) that submits
//!   final scores in the background
//!
//! # Example
//!
//! ```
//! use tetris_duel_scores::server::route;
//! use tetris_duel_scores::ScoreStore;
//!
//! let mut store = ScoreStore::in_memory();
//! let resp = route(&mut store, "POST", "/scores", r#"{"name":"ann","score":40}"#);
//! assert_eq!(resp.status, 200);
//! assert_eq!(store.leaderboard()[0].score, 40);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod reporter;
pub mod server;
pub mod store;

pub use client::ScoreClient;
pub use config::ScoreConfig;
pub use error::{Result, ScoreError};
pub use reporter::ScoreReporter;
pub use server::{route, ApiResponse, ScoreServer};
pub use store::{ScoreEntry, ScoreRow, ScoreStore};
