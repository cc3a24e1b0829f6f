//! File-backed high score persistence
//!
//! Layout: `<data_dir>/highscore.json` holding `{"highscore": n}`.
//! Writes go to a temp file first and are renamed into place.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::ScoreStore;

pub const HIGHSCORE_FILE: &str = "highscore.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub highscore: u64,
}

/// High score stored as JSON in a data directory
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    dir: PathBuf,
}

impl FileScoreStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { dir: data_dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(HIGHSCORE_FILE)
    }

    /// Read the stored score, creating the file with 0 when it is missing
    pub fn read(&self) -> Result<u64, StoreError> {
        let path = self.path();
        if !path.exists() {
            self.write(0)?;
            return Ok(0);
        }
        let json = fs::read_to_string(&path)?;
        let record: ScoreRecord = serde_json::from_str(&json)?;
        Ok(record.highscore)
    }

    pub fn write(&self, value: u64) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&ScoreRecord { highscore: value })?;
        let tmp = self.dir.join(format!("{}.tmp", HIGHSCORE_FILE));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path())?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load_high_score(&mut self) -> u64 {
        match self.read() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path().display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, value: u64) {
        if let Err(e) = self.write(value) {
            log::warn!("Could not save high score {}: {}", value, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_zero() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        let mut store = FileScoreStore::new(dir);
        assert_eq!(store.load_high_score(), 0);
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let mut store = FileScoreStore::new(dir);
        store.save_high_score(1337);
        assert_eq!(store.load_high_score(), 1337);

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["highscore"], 1337);
        assert!(!dir.join("highscore.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_zero() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join(HIGHSCORE_FILE), "{ not json").unwrap();
        let mut store = FileScoreStore::new(dir);
        assert!(matches!(store.read(), Err(StoreError::Json(_))));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn test_missing_key_defaults_to_zero() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join(HIGHSCORE_FILE), "{}").unwrap();
        let mut store = FileScoreStore::new(dir);
        assert_eq!(store.load_high_score(), 0);
    }
}
