use chrono::Duration;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::movie::MovieId;
use crate::domain::repositories::poster_store::{PosterRecord, PosterStore};
use crate::shared::utils::Clock;

/// Poster cache validity window
pub const DEFAULT_POSTER_TTL_HOURS: i64 = 24;

/// Keyed poster URL cache with lazy time-based expiry.
///
/// `get` serves an entry only while `now - stored_at < ttl`; expired
/// entries are inert until the next `set` overwrites them. There is no
/// sweep pass, so stale entries accumulate in the backing store.
pub struct PosterCache {
    entries: DashMap<MovieId, PosterRecord>,
    store: Option<Arc<dyn PosterStore>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PosterCache {
    /// In-memory cache with the default 24h TTL.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            store: None,
            clock,
            ttl: Duration::hours(DEFAULT_POSTER_TTL_HOURS),
        }
    }

    /// Cache backed by a persistent store. A store that cannot be read
    /// (missing, truncated, malformed) yields an empty cache; lookups
    /// simply miss until entries are written again.
    pub fn with_store(store: Arc<dyn PosterStore>, clock: Arc<dyn Clock>) -> Self {
        let entries = match store.load() {
            Ok(records) => records.into_iter().collect(),
            Err(err) => {
                warn!("poster store unreadable, starting empty: {}", err);
                DashMap::new()
            }
        };

        Self {
            entries,
            store: Some(store),
            clock,
            ttl: Duration::hours(DEFAULT_POSTER_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Poster URL for the movie, if a live entry exists.
    pub fn get(&self, movie_id: MovieId) -> Option<String> {
        let entry = self.entries.get(&movie_id)?;
        let age = self.clock.now() - entry.stored_at;
        if age < self.ttl {
            Some(entry.poster_url.clone())
        } else {
            debug!("poster cache entry for movie {} expired", movie_id);
            None
        }
    }

    /// Upsert an entry stamped with the current time and write through to
    /// the backing store. Store failures are logged, never propagated.
    pub fn set(&self, movie_id: MovieId, poster_url: impl Into<String>) {
        self.entries.insert(
            movie_id,
            PosterRecord {
                poster_url: poster_url.into(),
                stored_at: self.clock.now(),
            },
        );
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let snapshot: HashMap<MovieId, PosterRecord> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        if let Err(err) = store.save(&snapshot) {
            warn!("poster cache write failed: {}", err);
        }
    }
}
