//! Fire-and-forget score reporting for the synchronous game loop
//!
//! Owns a tokio runtime; submissions are spawned on it so the game loop never
//! waits on the network. Failures are logged and dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::ScoreClient;
use crate::config::ScoreConfig;
use crate::error::Result;
use crate::store::ScoreRow;
use tetris_duel_core::ScoreSink;

/// [`ScoreSink`] that posts final scores to the score service
///
/// Clones share the runtime and the in-flight submissions, so the host can
/// hand one clone to a match and keep another for [`flush`](Self::flush).
#[derive(Clone)]
pub struct ScoreReporter {
    runtime: Arc<Runtime>,
    client: ScoreClient,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ScoreReporter {
    /// Create a reporter, or `None` when reporting is disabled
    pub fn new(config: &ScoreConfig) -> Result<Option<Self>> {
        if config.disabled {
            info!("score reporting disabled (TETRIS_SCORES_DISABLED)");
            return Ok(None);
        }

        let runtime = Runtime::new()?;
        Ok(Some(Self {
            runtime: Arc::new(runtime),
            client: ScoreClient::from_config(config),
            pending: Arc::new(Mutex::new(Vec::new())),
        }))
    }

    pub fn client(&self) -> &ScoreClient {
        &self.client
    }

    /// Fetch the leaderboard, blocking the caller
    pub fn leaderboard(&self) -> Result<Vec<ScoreRow>> {
        self.runtime.block_on(self.client.leaderboard())
    }

    /// Wait up to `limit` for submissions still in flight
    pub fn flush(&self, limit: Duration) {
        let pending = std::mem::take(&mut *self.lock_pending());
        if pending.is_empty() {
            return;
        }

        let waited = self.runtime.block_on(async {
            tokio::time::timeout(limit, async {
                for handle in pending {
                    let _ = handle.await;
                }
            })
            .await
        });
        if waited.is_err() {
            warn!(?limit, "gave up waiting for score submissions");
        }
    }
}

impl ScoreReporter {
    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ScoreSink for ScoreReporter {
    fn submit(&mut self, name: &str, score: u32) {

        let client = self.client.clone();
        let name = name.to_string();
        let handle = self.runtime.spawn(async move {
            match client.submit(&name, score).await {
                Ok(id) => debug!(id, %name, score, "score submitted"),
                Err(e) => warn!(error = %e, %name, score, "failed to submit score"),
            }
        });
        let mut pending = self.lock_pending();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_is_none() {
        let config = ScoreConfig {
            disabled: true,
            ..ScoreConfig::default()
        };
        assert!(ScoreReporter::new(&config).unwrap().is_none());
    }

    #[test]
    fn test_failed_submission_does_not_panic() {
        let config = ScoreConfig {
            port: 9,
            timeout_ms: 200,
            ..ScoreConfig::default()
        };
        let mut reporter = ScoreReporter::new(&config).unwrap().unwrap();
        reporter.submit("ann", 40);
        reporter.flush(Duration::from_secs(2));
        assert!(reporter.lock_pending().is_empty());
    }
}
