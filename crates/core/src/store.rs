//! Best-score persistence.
//!
//! The best score is the only durable state. Controllers read it once when a
//! session starts and write it whenever the live score exceeds it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Durable storage for a single best-score integer.
pub trait BestScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    saves: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreDoc {
    best_score: u32,
}

/// Stores `{"best_score": N}` in a JSON file.
///
/// A missing file reads as zero.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<game>-best.json`
    pub fn in_dir(dir: &Path, game: &str) -> Self {
        Self::new(dir.join(format!("{game}-best.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let doc: BestScoreDoc = serde_json::from_str(&text)?;
        Ok(doc.best_score)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string(&BestScoreDoc { best_score: best })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Load the best score, falling back to zero when the store is unreadable.
pub(crate) fn load_or_zero(store: &dyn BestScoreStore) -> u32 {
    match store.load() {
        Ok(best) => best,
        Err(err) => {
            tracing::warn!(error = %err, "could not read best score, starting from 0");
            0
        }
    }
}

/// Persist `best`, logging instead of failing the game.
pub(crate) fn save_or_warn(store: &mut dyn BestScoreStore, best: u32) {
    if let Err(err) = store.save(best) {
        tracing::warn!(error = %err, best, "could not persist best score");
    }
}
