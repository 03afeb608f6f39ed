//! Score service configuration

use std::env;
use std::path::PathBuf;

/// Where the score service lives and where it stores scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreConfig {
    pub host: String,
    pub port: u16,
    /// JSON file backing the store (server side only).
    pub db_path: PathBuf,
    /// Skip reporting and leaderboard fetches entirely.
    pub disabled: bool,
    /// Per-request timeout for the client.
    pub timeout_ms: u64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: PathBuf::from("scores.json"),
            disabled: false,
            timeout_ms: 2000,
        }
    }
}

impl ScoreConfig {
    /// Defaults overridden by `TETRIS_SCORES_HOST`, `TETRIS_SCORES_PORT`,
    /// `TETRIS_SCORES_DB` and `TETRIS_SCORES_DISABLED`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("TETRIS_SCORES_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("TETRIS_SCORES_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let db_path = env::var("TETRIS_SCORES_DB")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        Self {
            host,
            port,
            db_path,
            disabled: Self::is_disabled(),
            timeout_ms: defaults.timeout_ms,
        }
    }

    /// Check whether score reporting is disabled via `TETRIS_SCORES_DISABLED`
    pub fn is_disabled() -> bool {
        env::var("TETRIS_SCORES_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    /// `host:port`, as used both for binding and connecting
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}
