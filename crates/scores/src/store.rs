//! JSON-file score store
//!
//! The whole table is kept in memory and rewritten on every insert. The file
//! is created on first write; a missing file is an empty table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScoreError};
use tetris_duel_core::types::LEADERBOARD_SIZE;

/// One stored score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: u64,
    pub name: String,
    pub score: u32,
}

/// Leaderboard row as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub name: String,
    pub score: u32,
}

impl From<&ScoreEntry> for ScoreRow {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            name: entry.name.clone(),
            score: entry.score,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    scores: Vec<ScoreEntry>,
}

/// Check a submitted name and score
///
/// Returns the trimmed name and the score as stored.
pub fn validate(name: Option<&str>, score: Option<i64>) -> Result<(String, u32)> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let Some(name) = name else {
        return Err(ScoreError::MissingName);
    };
    let Some(score) = score else {
        return Err(ScoreError::MissingScore);
    };
    let score = u32::try_from(score)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(ScoreError::InvalidScore(score))?;
    Ok((name.to_string(), score))
}

/// Scores table, optionally backed by a file
#[derive(Debug, Default)]
pub struct ScoreStore {
    path: Option<PathBuf>,
    entries: Vec<ScoreEntry>,
    next_id: u64,
}

impl ScoreStore {
    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Load the table from `path`; a missing file yields an empty table
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<StoreFile>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(e) => return Err(e.into()),
        };

        let max_id = file.scores.iter().map(|e| e.id).max().unwrap_or(0);
        debug!(path = %path.display(), entries = file.scores.len(), "score store opened");
        Ok(Self {
            path: Some(path),
            entries: file.scores,
            next_id: file.next_id.max(max_id + 1),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and persist a score; returns the new entry's id
    ///
    /// Nothing is kept in memory if writing the file fails.
    pub fn insert(&mut self, name: Option<&str>, score: Option<i64>) -> Result<u64> {
        let (name, score) = validate(name, score)?;
        let id = self.next_id;

        self.entries.push(ScoreEntry { id, name, score });
        self.next_id += 1;
        if let Err(e) = self.persist() {
            self.entries.pop();
            self.next_id -= 1;
            return Err(e);
        }
        Ok(id)
    }

    /// Highest `n` scores, ties in insertion order
    pub fn top(&self, n: usize) -> Vec<ScoreEntry> {
        let mut sorted: Vec<&ScoreEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        sorted.into_iter().take(n).cloned().collect()
    }

    /// The leaderboard: top 10 as wire rows
    pub fn leaderboard(&self) -> Vec<ScoreRow> {
        self.top(LEADERBOARD_SIZE).iter().map(ScoreRow::from).collect()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            next_id: self.next_id,
            scores: self.entries.clone(),
        };
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&file)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!(
            "tetris-duel-store-{}-{}-{}.json",
            tag,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(Some(" ann "), Some(10)).unwrap(), ("ann".to_string(), 10));
        assert!(matches!(validate(None, Some(10)), Err(ScoreError::MissingName)));
        assert!(matches!(validate(Some("  "), Some(10)), Err(ScoreError::MissingName)));
        assert!(matches!(validate(Some("a"), None), Err(ScoreError::MissingScore)));
        assert!(matches!(validate(Some("a"), Some(0)), Err(ScoreError::InvalidScore(0))));
        assert!(matches!(validate(Some("a"), Some(-5)), Err(ScoreError::InvalidScore(-5))));
    }

    #[test]
    fn test_top_orders_by_score_then_id() {
        let mut store = ScoreStore::in_memory();
        store.insert(Some("a"), Some(10)).unwrap();
        store.insert(Some("b"), Some(90)).unwrap();
        store.insert(Some("c"), Some(10)).unwrap();
        store.insert(Some("d"), Some(40)).unwrap();

        let names: Vec<_> = store.top(10).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["b", "d", "a", "c"]);
        assert_eq!(store.top(2).len(), 2);
    }

    #[test]
    fn test_leaderboard_caps_at_ten() {
        let mut store = ScoreStore::in_memory();
        for i in 1..=15 {
            store.insert(Some("p"), Some(i)).unwrap();
        }
        let board = store.leaderboard();
        assert_eq!(board.len(), 10);
        assert_eq!(board[0].score, 15);
        assert_eq!(board[9].score, 6);
    }

    #[test]
    fn test_rejected_insert_keeps_table() {
        let mut store = ScoreStore::in_memory();
        assert!(store.insert(Some("a"), Some(0)).is_err());
        assert!(store.is_empty());
        assert_eq!(store.insert(Some("a"), Some(1)).unwrap(), 1);
    }

    #[test]
    fn test_file_round_trip_keeps_ids_increasing() {
        let path = temp_path("roundtrip");
        {
            let mut store = ScoreStore::open(&path).unwrap();
            assert!(store.is_empty());
            assert_eq!(store.insert(Some("ann"), Some(160)).unwrap(), 1);
            assert_eq!(store.insert(Some("bob"), Some(40)).unwrap(), 2);
        }

        let mut reopened = ScoreStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.top(1)[0].name, "ann");
        assert_eq!(reopened.insert(Some("cy"), Some(10)).unwrap(), 3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            ScoreStore::open(&path),
            Err(ScoreError::Serialization(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
