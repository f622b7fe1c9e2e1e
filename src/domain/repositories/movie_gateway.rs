use async_trait::async_trait;

use crate::domain::entities::movie::{Movie, MovieId};
use crate::domain::value_objects::AuthToken;
use crate::shared::errors::AppResult;
use crate::shared::pagination::{Page, PageRequest};

/// Contract for the backend supplying movie data and accepting
/// ratings/favorites. The orchestrator only ever talks to this trait.
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Fetch one catalog page, ordered by aggregate rating.
    async fn fetch_catalog_page(&self, request: PageRequest) -> AppResult<Page<Movie>>;

    /// Personalized recommendations for the credential holder. An empty
    /// list means the user has no recommendations yet, not an error.
    async fn fetch_recommendations(&self, token: Option<&AuthToken>) -> AppResult<Vec<Movie>>;

    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Submit a user rating (0-5 in 0.5 steps, validated by the caller).
    async fn submit_rating(
        &self,
        token: Option<&AuthToken>,
        movie_id: MovieId,
        value: f32,
    ) -> AppResult<()>;

    /// Toggle favorite membership for the credential holder.
    async fn toggle_favorite(&self, token: Option<&AuthToken>, movie_id: MovieId) -> AppResult<()>;

    /// Editorial featured list shown on the landing view.
    async fn fetch_featured(&self) -> AppResult<Vec<Movie>>;
}
