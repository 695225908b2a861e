//! Leaderboard persistence: best score per player name, top-N listing.
//!
//! Entries live in a single JSON file. Reads and writes go through `tokio::fs`
//! so the driver can run them on a runtime after the session ended; writes
//! replace the file through a temporary sibling so a crash never leaves a
//! half-written leaderboard behind.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub use guideline_tetris_types as types;

use crate::types::{LEADERBOARD_NAME_LIMIT, LEADERBOARD_SIZE};

/// Environment variable overriding the leaderboard file location.
pub const LEADERBOARD_PATH_ENV: &str = "TETRIS_LEADERBOARD";

/// One player's best session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Length of the session in milliseconds
    pub time_ms: u64,
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub score: u32,
    pub level: u32,
    pub time_ms: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeaderboardFile {
    entries: Vec<Entry>,
}

/// JSON-file backed leaderboard.
#[derive(Debug)]
pub struct FileLeaderboard {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `$TETRIS_LEADERBOARD`, or `leaderboard.json` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(LEADERBOARD_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("leaderboard.json"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top `limit` entries by descending score (ties: shorter session first).
    pub async fn load(&self, limit: usize) -> Result<Vec<Entry>> {
        let mut entries = self.read().await?.entries;
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.time_ms.cmp(&b.time_ms)));
        entries.truncate(limit);
        Ok(entries)
    }

    /// The default listing size.
    pub async fn top(&self) -> Result<Vec<Entry>> {
        self.load(LEADERBOARD_SIZE).await
    }

    /// Record a session under `name`. Only a higher score replaces an existing
    /// entry. Returns whether the leaderboard changed.
    pub async fn submit(&self, name: &str, submission: Submission) -> Result<bool> {
        let name = normalize_name(name)?;
        let _guard = self.write_lock.lock().await;

        let mut file = self.read().await?;
        let entry = Entry {
            name,
            score: submission.score,
            level: submission.level,
            time_ms: submission.time_ms,
        };
        match file.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) if existing.score >= entry.score => {
                log::info!(
                    "keeping {}'s best score {} (submitted {})",
                    existing.name,
                    existing.score,
                    entry.score
                );
                return Ok(false);
            }
            Some(existing) => *existing = entry,
            None => file.entries.push(entry),
        }

        self.write(&file).await?;
        log::info!("leaderboard updated at {}", self.path.display());
        Ok(true)
    }

    async fn read(&self) -> Result<LeaderboardFile> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("malformed leaderboard {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(LeaderboardFile::default()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read {}", self.path.display()))
            }
        }
    }

    async fn write(&self, file: &LeaderboardFile) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_vec_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Trim surrounding whitespace and cut to the name limit (in characters).
pub fn normalize_name(name: &str) -> Result<String> {
    let name: String = name.trim().chars().take(LEADERBOARD_NAME_LIMIT).collect();
    if name.is_empty() {
        bail!("leaderboard name must not be empty");
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_board(test: &str) -> FileLeaderboard {
        let dir = std::env::temp_dir().join(format!(
            "guideline-tetris-leaderboard-{}-{}",
            std::process::id(),
            test
        ));
        let _ = std::fs::remove_dir_all(&dir);
        FileLeaderboard::new(dir.join("leaderboard.json"))
    }

    fn session(score: u32) -> Submission {
        Submission {
            score,
            level: 1 + score / 1000,
            time_ms: 60_000,
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_leaderboard() {
        let board = temp_board("missing");
        assert!(board.load(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keeps_best_score_per_name() {
        let board = temp_board("best");
        assert!(board.submit("ada", session(500)).await.unwrap());
        assert!(!board.submit("ada", session(300)).await.unwrap());
        assert!(!board.submit("ada", session(500)).await.unwrap());
        assert!(board.submit("ada", session(2500)).await.unwrap());

        let entries = board.load(10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 2500);
        assert_eq!(entries[0].level, 3);
    }

    #[tokio::test]
    async fn load_orders_by_score_and_limits() {
        let board = temp_board("order");
        for (name, score) in [("a", 100), ("b", 900), ("c", 400), ("d", 700)] {
            board.submit(name, session(score)).await.unwrap();
        }

        let top: Vec<_> = board
            .load(3)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(top, vec!["b", "d", "c"]);
    }

    #[tokio::test]
    async fn names_are_trimmed_and_truncated() {
        let board = temp_board("names");
        let long = "x".repeat(40);
        board.submit(&format!("  {long} "), session(10)).await.unwrap();

        let entries = board.top().await.unwrap();
        assert_eq!(entries[0].name.chars().count(), LEADERBOARD_NAME_LIMIT);
        assert!(board.submit("   ", session(10)).await.is_err());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let board = temp_board("malformed");
        std::fs::create_dir_all(board.path().parent().unwrap()).unwrap();
        std::fs::write(board.path(), b"not json").unwrap();
        assert!(board.load(10).await.is_err());
    }
}
