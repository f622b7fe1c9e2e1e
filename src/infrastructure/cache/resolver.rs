use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::movie::MovieId;
use crate::domain::repositories::PosterLookup;
use crate::infrastructure::cache::PosterCache;

/// Cache-first poster resolution.
///
/// A cache miss falls back to the third-party lookup; a hit there is
/// written back so the next 24 hours of reads stay local. Lookup failures
/// degrade to "no poster" and never fail the surrounding fetch.
pub struct PosterResolver {
    cache: Arc<PosterCache>,
    lookup: Arc<dyn PosterLookup>,
}

impl PosterResolver {
    pub fn new(cache: Arc<PosterCache>, lookup: Arc<dyn PosterLookup>) -> Self {
        Self { cache, lookup }
    }

    pub async fn resolve(&self, movie_id: MovieId, title: &str) -> Option<String> {
        if let Some(url) = self.cache.get(movie_id) {
            return Some(url);
        }

        match self.lookup.find_poster(title).await {
            Ok(Some(url)) => {
                self.cache.set(movie_id, url.clone());
                Some(url)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("poster lookup for {:?} failed: {}", title, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::poster_lookup::MockPosterLookup;
    use crate::shared::utils::SystemClock;

    fn cache() -> Arc<PosterCache> {
        Arc::new(PosterCache::new(Arc::new(SystemClock)))
    }

    #[tokio::test]
    async fn cache_hit_skips_lookup() {
        let cache = cache();
        cache.set(7, "http://img/7.jpg");

        let mut lookup = MockPosterLookup::new();
        lookup.expect_find_poster().never();

        let resolver = PosterResolver::new(cache, Arc::new(lookup));
        assert_eq!(
            resolver.resolve(7, "Heat (1995)").await,
            Some("http://img/7.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn lookup_result_is_written_back() {
        let cache = cache();
        let mut lookup = MockPosterLookup::new();
        lookup
            .expect_find_poster()
            .times(1)
            .returning(|_| Ok(Some("http://img/9.jpg".to_string())));

        let resolver = PosterResolver::new(cache.clone(), Arc::new(lookup));
        assert_eq!(
            resolver.resolve(9, "Up").await,
            Some("http://img/9.jpg".to_string())
        );
        // Second call is served from the cache; the mock would panic on a
        // second lookup.
        assert_eq!(
            resolver.resolve(9, "Up").await,
            Some("http://img/9.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_no_poster() {
        let cache = cache();
        let mut lookup = MockPosterLookup::new();
        lookup.expect_find_poster().returning(|_| {
            Err(crate::shared::errors::AppError::NetworkError(
                "tmdb down".to_string(),
            ))
        });

        let resolver = PosterResolver::new(cache.clone(), Arc::new(lookup));
        assert_eq!(resolver.resolve(11, "Brazil").await, None);
        assert!(cache.is_empty());
    }
}
