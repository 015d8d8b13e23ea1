//! Best-score persistence
//!
//! The game keeps exactly one persisted value: the best score. Backends:
//! - [`MemoryStore`]: shared in-memory cell (tests, headless runs)
//! - [`FileStore`]: JSON file on native targets
//! - [`LocalStorageStore`]: browser LocalStorage on wasm32

use core::fmt;
use std::cell::Cell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Why a best-score load or save failed
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem error
    Io(std::io::Error),
    /// Stored record could not be parsed or encoded
    Parse(String),
    /// Backing storage is not available (no window, storage disabled)
    Unavailable(&'static str),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "best score i/o failed: {e}"),
            Self::Parse(msg) => write!(f, "best score record is malformed: {msg}"),
            Self::Unavailable(what) => write!(f, "best score storage unavailable: {what}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Best-score storage collaborator
pub trait ScoreStore {
    /// Stored best score; 0 when nothing has been saved yet
    fn load_best_score(&self) -> Result<u32, PersistError>;
    fn save_best_score(&mut self, score: u32) -> Result<(), PersistError>;
}

/// In-memory store. Clones share the same cell, so a test can keep a handle
/// while the game owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            best: Rc::new(Cell::new(best)),
        }
    }

    pub fn get(&self) -> u32 {
        self.best.get()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> Result<u32, PersistError> {
        Ok(self.best.get())
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), PersistError> {
        self.best.set(score);
        Ok(())
    }
}

/// Parse a stored value, tolerating surrounding whitespace
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn parse_score(raw: &str) -> Result<u32, PersistError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| PersistError::Parse(format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_cell() {
        let store = MemoryStore::new(42);
        let mut handle = store.clone();
        handle.save_best_score(50).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 50);
        assert_eq!(store.get(), 50);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(" 42\n").unwrap(), 42);
        assert!(matches!(parse_score("abc"), Err(PersistError::Parse(_))));
        assert!(matches!(parse_score("-1"), Err(PersistError::Parse(_))));
    }

    #[test]
    fn test_error_display() {
        let err = PersistError::Unavailable("no window");
        assert_eq!(err.to_string(), "best score storage unavailable: no window");
        let io = PersistError::from(std::io::Error::other("disk"));
        assert!(std::error::Error::source(&io).is_some());
    }
}
