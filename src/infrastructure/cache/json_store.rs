use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::movie::MovieId;
use crate::domain::repositories::poster_store::{PosterRecord, PosterStore};
use crate::shared::errors::{AppError, AppResult};

/// Poster store persisted as a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PosterStore for JsonFileStore {
    fn load(&self) -> AppResult<HashMap<MovieId, PosterRecord>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| AppError::CacheError(format!("read {}: {}", self.path.display(), e)))?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| AppError::CacheError(format!("parse {}: {}", self.path.display(), e)))
    }

    fn save(&self, records: &HashMap<MovieId, PosterRecord>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::CacheError(format!("create {}: {}", parent.display(), e)))?;
        }
        let raw = serde_json::to_string(records)
            .map_err(|e| AppError::CacheError(format!("encode poster cache: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::CacheError(format!("write {}: {}", self.path.display(), e)))
    }
}
