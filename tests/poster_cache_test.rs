use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use reeldeck::{
    AppError, AppResult, Clock, JsonFileStore, ManualClock, MovieId, PosterCache, PosterRecord,
    PosterStore,
};

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ))
}

fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("reeldeck_{}_{}.json", name, std::process::id()))
}

/// Store whose writes always fail, as when browser storage quota is hit.
struct QuotaExceededStore;

impl PosterStore for QuotaExceededStore {
    fn load(&self) -> AppResult<HashMap<MovieId, PosterRecord>> {
        Ok(HashMap::new())
    }

    fn save(&self, _records: &HashMap<MovieId, PosterRecord>) -> AppResult<()> {
        Err(AppError::CacheError("quota exceeded".to_string()))
    }
}

#[test]
fn set_then_get_round_trips() {
    let cache = PosterCache::new(manual_clock());
    cache.set(42, "http://x/p.jpg");
    assert_eq!(cache.get(42), Some("http://x/p.jpg".to_string()));
}

#[test]
fn entries_expire_after_the_ttl() {
    let clock = manual_clock();
    let cache = PosterCache::new(clock.clone());
    cache.set(42, "http://x/p.jpg");

    clock.advance(Duration::hours(23));
    assert_eq!(cache.get(42), Some("http://x/p.jpg".to_string()));

    clock.advance(Duration::hours(1));
    assert_eq!(cache.get(42), None);

    // an expired entry is inert, not resurrected
    assert_eq!(cache.get(42), None);

    // a fresh set overwrites the stale entry
    cache.set(42, "http://x/p2.jpg");
    assert_eq!(cache.get(42), Some("http://x/p2.jpg".to_string()));
}

#[test]
fn unknown_movie_misses() {
    let cache = PosterCache::new(manual_clock());
    assert_eq!(cache.get(99), None);
}

#[test]
fn corrupt_backing_store_fails_open() {
    let path = temp_store_path("corrupt");
    fs::write(&path, "{not valid json!").unwrap();

    let store = Arc::new(JsonFileStore::new(path.clone()));
    let cache = PosterCache::with_store(store, manual_clock());

    assert_eq!(cache.get(42), None);
    assert!(cache.is_empty());

    // writes recover the store
    cache.set(42, "http://x/p.jpg");
    assert_eq!(cache.get(42), Some("http://x/p.jpg".to_string()));

    let _ = fs::remove_file(path);
}

#[test]
fn entries_survive_a_reload_from_the_store() {
    let path = temp_store_path("reload");
    let _ = fs::remove_file(&path);
    let clock = manual_clock();

    {
        let store = Arc::new(JsonFileStore::new(path.clone()));
        let cache = PosterCache::with_store(store, clock.clone());
        cache.set(42, "http://x/p.jpg");
        cache.set(43, "http://x/q.jpg");
    }

    let store = Arc::new(JsonFileStore::new(path.clone()));
    let cache = PosterCache::with_store(store, clock.clone());
    assert_eq!(cache.get(42), Some("http://x/p.jpg".to_string()));
    assert_eq!(cache.get(43), Some("http://x/q.jpg".to_string()));

    // persisted timestamps expire like fresh ones
    clock.advance(Duration::hours(25));
    assert_eq!(cache.get(42), None);

    let _ = fs::remove_file(path);
}

#[test]
fn store_write_failure_never_interrupts_the_caller() {
    let cache = PosterCache::with_store(Arc::new(QuotaExceededStore), manual_clock());

    cache.set(42, "http://x/p.jpg");
    // the in-memory entry still serves reads
    assert_eq!(cache.get(42), Some("http://x/p.jpg".to_string()));
}

#[test]
fn custom_ttl_is_honored() {
    let clock = manual_clock();
    let cache = PosterCache::new(clock.clone()).with_ttl(Duration::minutes(5));
    cache.set(1, "http://x/p.jpg");

    clock.advance(Duration::minutes(4));
    assert!(cache.get(1).is_some());

    clock.advance(Duration::minutes(2));
    assert!(cache.get(1).is_none());
}

#[test]
fn clock_trait_objects_are_shareable() {
    let clock: Arc<dyn Clock> = manual_clock();
    let cache = PosterCache::new(clock);
    cache.set(1, "http://x/p.jpg");
    assert_eq!(cache.len(), 1);
}
