//! Best-score persistence
//!
//! The simulation only needs a single non-negative integer. Stores must never
//! fail outward: a broken store reads as 0 and drops writes, with a warning.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the best score lives between runs
pub trait ScoreStore {
    fn load_best_score(&self) -> u64;
    fn save_best_score(&mut self, score: u64);
}

/// In-process store (no persistence across runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl MemoryScoreStore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> u64 {
        self.best
    }

    fn save_best_score(&mut self, score: u64) {
        self.best = score;
    }
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u64,
}

/// Best score kept as a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load_best_score(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No best score at {} ({}), starting fresh", self.path.display(), e);
                return 0;
            }
        };
        match serde_json::from_str::<BestScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded best score {}", record.best_score);
                record.best_score
            }
            Err(e) => {
                log::warn!("Ignoring corrupt best score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_best_score(&mut self, score: u64) {
        let record = BestScoreRecord { best_score: score };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode best score: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            log::warn!("Failed to save best score to {}: {}", self.path.display(), e);
            return;
        }
        log::info!("Best score saved ({})", score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("meteor_volley_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.load_best_score(), 0);
        store.save_best_score(42);
        assert_eq!(store.load_best_score(), 42);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileScoreStore::new(&path);
        store.save_best_score(1234);
        assert_eq!(JsonFileScoreStore::new(&path).load_best_score(), 1234);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_or_corrupt_file_reads_zero() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(JsonFileScoreStore::new(&path).load_best_score(), 0);

        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(JsonFileScoreStore::new(&path).load_best_score(), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unwritable_path_is_silent() {
        let mut store = JsonFileScoreStore::new(std::env::temp_dir().join("no_such_dir/x/best.json"));
        store.save_best_score(5);
        assert_eq!(store.load_best_score(), 0);
    }
}
