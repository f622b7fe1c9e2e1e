use async_trait::async_trait;

use crate::shared::errors::AppResult;

/// Third-party poster resolution by movie title.
///
/// Consulted only after the poster cache misses; `Ok(None)` means the
/// service has no artwork for the title, which callers treat the same as
/// a lookup failure (the movie renders without a poster).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterLookup: Send + Sync {
    async fn find_poster(&self, title: &str) -> AppResult<Option<String>>;
}
