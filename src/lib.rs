pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-exports for convenience
pub use application::orchestrator::{ContentOrchestrator, ContentSnapshot};
pub use config::AppConfig;
pub use domain::entities::movie::{Movie, MovieId};
pub use domain::repositories::{MovieGateway, PosterLookup, PosterRecord, PosterStore};
pub use domain::value_objects::{AuthToken, ContentView, FetchFailure, FetchKind, FetchState};
pub use infrastructure::cache::{JsonFileStore, PosterCache, PosterResolver};
pub use infrastructure::http::HttpMovieGateway;
pub use infrastructure::tmdb::TmdbClient;
pub use shared::errors::{AppError, AppResult};
pub use shared::pagination::{Page, PageRequest};
pub use shared::utils::{Clock, Debouncer, ManualClock, SystemClock};
