//! High score and game history persistence.
//!
//! The core talks to a `ScoreStore`. `JsonStore` keeps everything, settings
//! included, in one pretty-printed JSON save file; `MemoryStore` is the
//! in-process stand-in.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Difficulty, GameMode, Settings};

/// History entries kept; older ones are dropped first.
pub const MAX_STORED_GAMES: usize = 50;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access save file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode save data")]
    Json(#[from] serde_json::Error),
}

/// Final numbers of one finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub max_combo: u32,
    pub duration_ms: u64,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub snake_length: usize,
    /// Unix time in milliseconds.
    pub timestamp: u64,
}

pub trait ScoreStore {
    fn read_high_score(&self) -> u32;
    fn write_high_score(&mut self, score: u32) -> Result<(), StorageError>;
    /// Appends a record, keeping only the most recent `MAX_STORED_GAMES`.
    fn append_game_stats(&mut self, stats: GameStats) -> Result<(), StorageError>;
}

fn push_capped(games: &mut Vec<GameStats>, stats: GameStats) {
    games.push(stats);
    if games.len() > MAX_STORED_GAMES {
        let excess = games.len() - MAX_STORED_GAMES;
        games.drain(..excess);
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub high_score: u32,
    pub games: Vec<GameStats>,
}

impl ScoreStore for MemoryStore {
    fn read_high_score(&self) -> u32 {
        self.high_score
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), StorageError> {
        self.high_score = score;
        Ok(())
    }

    fn append_game_stats(&mut self, stats: GameStats) -> Result<(), StorageError> {
        push_capped(&mut self.games, stats);
        Ok(())
    }
}

// ── JSON save file ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub high_score: u32,
    pub games: Vec<GameStats>,
    pub settings: Settings,
}

pub struct JsonStore {
    path: PathBuf,
    data: SaveData,
}

impl JsonStore {
    /// Opens the save file at `path`. A missing file starts fresh; an
    /// unreadable or corrupt one is logged and replaced by defaults on the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match Self::read(&path) {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!("no save file at {}, starting fresh", path.display());
                SaveData::default()
            }
            Err(err) => {
                warn!("ignoring unreadable save file {}: {err}", path.display());
                SaveData::default()
            }
        };
        Self { path, data }
    }

    fn read(path: &Path) -> Result<Option<SaveData>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn flush(&self) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, text).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.data.settings = settings.clone();
        self.flush()
    }
}

impl ScoreStore for JsonStore {
    fn read_high_score(&self) -> u32 {
        self.data.high_score
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), StorageError> {
        self.data.high_score = score;
        self.flush()
    }

    fn append_game_stats(&mut self, stats: GameStats) -> Result<(), StorageError> {
        push_capped(&mut self.data.games, stats);
        self.flush()
    }
}
