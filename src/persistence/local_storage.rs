//! Browser LocalStorage best score

use web_sys::Storage;

use super::{PersistError, ScoreStore, parse_score};

/// LocalStorage key holding the best score as a decimal string
const STORAGE_KEY: &str = "aami_highscore";

/// LocalStorage store
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, PersistError> {
        web_sys::window()
            .ok_or(PersistError::Unavailable("no window"))?
            .local_storage()
            .ok()
            .flatten()
            .ok_or(PersistError::Unavailable("localStorage disabled"))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> Result<u32, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => parse_score(&raw),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistError::Unavailable("localStorage read rejected")),
        }
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|_| PersistError::Unavailable("localStorage write rejected"))
    }
}
