use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use regex::Regex;
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::repositories::PosterLookup;
use crate::infrastructure::tmdb::models::TmdbSearchResponse;
use crate::shared::errors::{AppError, AppResult};

type DirectRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
// TMDB allows ~40 requests per 10 seconds
const MIN_REQUEST_INTERVAL_MS: u64 = 250;
const BURST_SIZE: u32 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Poster lookup against TMDB's movie search.
///
/// Catalog titles carry a trailing release year ("Heat (1995)") that TMDB
/// search chokes on; it is stripped before querying.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: DirectRateLimiter,
    year_suffix: Regex,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("reeldeck/0.1")
            .build()
            .map_err(AppError::from)?;

        let burst = NonZeroU32::new(BURST_SIZE)
            .ok_or_else(|| AppError::InternalError("rate limit burst must be non-zero".into()))?;
        let quota = Quota::with_period(Duration::from_millis(MIN_REQUEST_INTERVAL_MS))
            .ok_or_else(|| AppError::InternalError("rate limit period must be non-zero".into()))?
            .allow_burst(burst);

        let year_suffix = Regex::new(r"\s*\(\d{4}\)\s*$")
            .map_err(|e| AppError::InternalError(format!("year suffix pattern: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            rate_limiter: RateLimiter::direct(quota),
            year_suffix,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Option<Self>> {
        match &config.tmdb_api_key {
            Some(key) => Self::new(config.tmdb_base_url.clone(), key.clone()).map(Some),
            None => Ok(None),
        }
    }

    fn clean_title(&self, title: &str) -> String {
        self.year_suffix.replace(title, "").trim().to_string()
    }

    fn build_search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl PosterLookup for TmdbClient {
    async fn find_poster(&self, title: &str) -> AppResult<Option<String>> {
        let query = self.clean_title(title);
        if query.is_empty() {
            return Ok(None);
        }

        self.rate_limiter.until_ready().await;

        let url = self.build_search_url(&query);
        debug!("TMDB poster search for {:?}", query);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let payload: TmdbSearchResponse = response.json().await?;

        Ok(payload
            .results
            .into_iter()
            .next()
            .and_then(|movie| movie.poster_path)
            .map(|path| format!("{}{}", IMAGE_BASE_URL, path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new("https://api.themoviedb.org/3", "k").unwrap()
    }

    #[test]
    fn strips_trailing_year_from_title() {
        let tmdb = client();
        assert_eq!(tmdb.clean_title("Toy Story (1995)"), "Toy Story");
        assert_eq!(tmdb.clean_title("Heat"), "Heat");
        // Only a trailing year is stripped
        assert_eq!(tmdb.clean_title("1984 (1984)"), "1984");
    }

    #[test]
    fn search_url_encodes_query() {
        let tmdb = client();
        let url = tmdb.build_search_url("Léon: The Professional");
        assert!(url.starts_with(
            "https://api.themoviedb.org/3/search/movie?api_key=k&query="
        ));
        assert!(!url.contains(' '));
    }
}
