use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::movie::MovieId;
use crate::shared::errors::AppResult;

/// Persisted poster cache entry. Validity is decided by the cache against
/// its TTL; the store keeps expired records until they are overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterRecord {
    pub poster_url: String,
    pub stored_at: DateTime<Utc>,
}

/// Persistence seam for the poster cache's backing map.
///
/// Implementations report unreadable or malformed data as `CacheError`;
/// the cache treats any load failure as an empty store (fail-open) and
/// logs save failures without interrupting the caller.
pub trait PosterStore: Send + Sync {
    fn load(&self) -> AppResult<HashMap<MovieId, PosterRecord>>;

    fn save(&self, records: &HashMap<MovieId, PosterRecord>) -> AppResult<()>;
}
