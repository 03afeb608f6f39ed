//! Score reporting seam
//!
//! The engine never performs I/O. When a board reaches a terminal state the
//! [`Match`](crate::controller::Match) hands the final score to a
//! [`ScoreSink`]; whatever the sink does with it (HTTP, file, nothing) cannot
//! fail back into the game.

use std::sync::{Arc, Mutex};

/// Receives final scores of finished boards
pub trait ScoreSink {
    /// Called once per finished board whose score is greater than zero.
    fn submit(&mut self, name: &str, score: u32);
}

/// Sink that drops every score
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn submit(&mut self, _name: &str, _score: u32) {}
}

/// In-memory sink that records submissions in order
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to a match.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    submitted: Arc<Mutex<Vec<(String, u32)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far
    pub fn submitted(&self) -> Vec<(String, u32)> {
        self.submitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ScoreSink for RecordingSink {
    fn submit(&mut self, name: &str, score: u32) {
        self.submitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((name.to_string(), score));
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn submit(&mut self, name: &str, score: u32) {
        (**self).submit(name, score);
    }
}
