//! High score leaderboard system
//!
//! Persisted as a JSON array of `{name, score, level}`, tracks top 10 scores.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::truncate_name;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Errors from writing the score table
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name, at most 10 characters
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry; an equal score ranks below it
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, name: &str, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: truncate_name(name),
            score,
            level,
        };

        // Sorted descending; equal scores keep insertion order
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file.
    ///
    /// A missing, unreadable or corrupt file gives an empty table.
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found at {}, starting fresh", path.display());
                return Self::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores from {}: {}", path.display(), e);
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save high scores to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Bring a table read from disk back to the invariants: sorted, capped,
    /// names within length
    fn normalize(&mut self) {
        for entry in &mut self.entries {
            entry.name = truncate_name(&entry.name);
        }
        // Stable sort keeps file order among equal scores
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Where a finished round's score goes
pub trait ScoreStore {
    /// Merge a result into the table. Returns the rank achieved, if any.
    fn submit(
        &mut self,
        name: &str,
        score: u64,
        level: u32,
    ) -> Result<Option<usize>, HighScoreError>;
}

impl ScoreStore for HighScores {
    fn submit(
        &mut self,
        name: &str,
        score: u64,
        level: u32,
    ) -> Result<Option<usize>, HighScoreError> {
        Ok(self.add_score(name, score, level))
    }
}

/// Score table backed by a JSON file, written through on every qualifying submit
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
    scores: HighScores,
}

impl HighScoreFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = HighScores::load(&path);
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }
}

impl ScoreStore for HighScoreFile {
    fn submit(
        &mut self,
        name: &str,
        score: u64,
        level: u32,
    ) -> Result<Option<usize>, HighScoreError> {
        let rank = self.scores.add_score(name, score, level);
        if rank.is_some() {
            self.scores.save(&self.path)?;
        }
        Ok(rank)
    }
}
