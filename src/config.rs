use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, environment-driven with sensible defaults.
///
/// Everything the core needs from the outside world is passed in
/// explicitly; nothing reads ambient state after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog backend base URL
    pub api_base_url: String,
    /// TMDB API base URL for poster lookups
    pub tmdb_base_url: String,
    /// TMDB API key; poster lookup is disabled when absent
    pub tmdb_api_key: Option<String>,
    /// Catalog page size
    pub per_page: u32,
    /// Poster cache validity window
    pub poster_ttl_hours: i64,
    /// Poster cache persistence location; in-memory only when absent
    pub poster_cache_path: Option<PathBuf>,
    /// Search input coalescing window
    pub search_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
            tmdb_api_key: None,
            per_page: 12,
            poster_ttl_hours: 24,
            poster_cache_path: None,
            search_debounce_ms: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment (and a `.env` file when
    /// present), falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            api_base_url: env::var("REELDECK_API_URL").unwrap_or(defaults.api_base_url),
            tmdb_base_url: env::var("TMDB_BASE_URL").unwrap_or(defaults.tmdb_base_url),
            tmdb_api_key: env::var("TMDB_API_KEY").ok(),
            per_page: parse_env("REELDECK_PER_PAGE", defaults.per_page),
            poster_ttl_hours: parse_env("REELDECK_POSTER_TTL_HOURS", defaults.poster_ttl_hours),
            poster_cache_path: env::var("REELDECK_POSTER_CACHE").ok().map(PathBuf::from),
            search_debounce_ms: parse_env(
                "REELDECK_SEARCH_DEBOUNCE_MS",
                defaults.search_debounce_ms,
            ),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_backend_contract() {
        let config = AppConfig::default();
        assert_eq!(config.per_page, 12);
        assert_eq!(config.poster_ttl_hours, 24);
        assert!(config.tmdb_api_key.is_none());
    }
}
