//! High score persistence
//!
//! A single scalar survives across runs, stored as a small JSON file next
//! to wherever the player launched the game (or a path given on the CLI).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Loads and conditionally updates the persisted high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score. A missing file means no score yet.
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score file {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed high score file {}", self.path.display()))?;

        Ok(record.high_score)
    }

    /// Persist the score if it beats the stored one. Returns true when a
    /// new high score was written.
    pub fn record(&self, score: u32) -> Result<bool> {
        if score <= self.load()? {
            return Ok(false);
        }

        let contents = serde_json::to_string(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write high score file {}", self.path.display()))?;

        Ok(true)
    }
}
