//! Native best-score file
//!
//! Stores `{ "best_score": n }` as JSON. A missing file reads as zero.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PersistError, ScoreStore};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    best_score: u32,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load_best_score(&self) -> Result<u32, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let record: Record = serde_json::from_str(&json)?;
                Ok(record.best_score)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Record { best_score: score })?;
        std::fs::write(&self.path, json)?;
        log::debug!("Best score {score} written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("save").join("best.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let (_dir, store) = setup_test_dir();
        assert_eq!(store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (_dir, mut store) = setup_test_dir();
        store.save_best_score(42).unwrap();

        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.load_best_score().unwrap(), 42);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"best_score\": 42"));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let (dir, _) = setup_test_dir();
        let path = dir.path().join("best.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(
            store.load_best_score(),
            Err(PersistError::Parse(_))
        ));
    }
}
