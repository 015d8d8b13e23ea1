//! Best score record
//!
//! One value, kept across runs and persisted through a
//! [`ScoreStore`](crate::persistence::ScoreStore). A new record is announced at
//! most once per run.

use serde::{Deserialize, Serialize};

/// Best score plus the per-run "new record" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    best: u32,
    is_new: bool,
}

impl BestScore {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            is_new: false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether the finished run set a new record
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Clear the new-record flag for a fresh run
    pub fn begin_run(&mut self) {
        self.is_new = false;
    }

    /// Submit a final run score. Returns true when it beats the best score,
    /// in which case the caller persists [`best`](Self::best).
    ///
    /// A second submit in the same run never raises the flag again.
    pub fn submit(&mut self, score: u32) -> bool {
        if self.is_new || score <= self.best {
            return false;
        }
        self.best = score;
        self.is_new = true;
        true
    }
}
