use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Difficulty, SessionResult};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("store file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Best score of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i32,
    pub difficulty: Difficulty,
    /// Category display label.
    pub category: String,
}

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredData {
    #[serde(default)]
    pub last_player: Option<String>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl StoredData {
    /// Keeps each player's best score; metadata always follows the latest game.
    pub fn record_score(&mut self, entry: LeaderboardEntry) {
        let existing = self
            .leaderboard
            .iter_mut()
            .find(|stored| stored.name.to_lowercase() == entry.name.to_lowercase());

        match existing {
            Some(stored) if entry.score > stored.score => *stored = entry,
            Some(stored) => {
                stored.difficulty = entry.difficulty;
                stored.category = entry.category;
            }
            None => self.leaderboard.push(entry),
        }
    }

    /// Highest scores first.
    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut entries = self.leaderboard.clone();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        entries
    }
}

/// JSON file store. A disabled store reads nothing and writes nothing.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: Option<PathBuf>,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    pub fn last_player(&self) -> Option<String> {
        self.load().last_player
    }

    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.load().top(limit)
    }

    /// Stores a single-player score and remembers the player name.
    ///
    /// Versus results are not persisted.
    pub fn record(&self, name: &str, result: &SessionResult) {
        let Some(path) = &self.path else {
            return;
        };
        let SessionResult::Single {
            score,
            difficulty,
            category,
        } = result
        else {
            return;
        };

        let mut data = self.load();
        data.record_score(LeaderboardEntry {
            name: name.to_string(),
            score: *score,
            difficulty: *difficulty,
            category: category.label().to_string(),
        });
        data.last_player = Some(name.to_string());

        if let Err(err) = write_data(path, &data) {
            warn!("Could not save leaderboard to {}: {}", path.display(), err);
        }
    }

    /// Current contents; an absent, unreadable or corrupt file reads as empty.
    pub fn load(&self) -> StoredData {
        let Some(path) = &self.path else {
            return StoredData::default();
        };

        match read_data(path) {
            Ok(data) => data,
            Err(StoreError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No store at {} yet", path.display());
                StoredData::default()
            }
            Err(err) => {
                warn!("Ignoring store at {}: {}", path.display(), err);
                StoredData::default()
            }
        }
    }
}

fn read_data(path: &Path) -> Result<StoredData, StoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_data(path: &Path, data: &StoredData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}
