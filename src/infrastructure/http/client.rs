use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::entities::movie::{Movie, MovieId};
use crate::domain::repositories::MovieGateway;
use crate::domain::value_objects::AuthToken;
use crate::infrastructure::http::dto::{
    ApiEnvelope, CatalogPageDto, FavoriteRequestDto, MovieDto, RateRequestDto,
};
use crate::infrastructure::http::mapper::MovieMapper;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::pagination::{Page, PageRequest};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `MovieGateway` against the catalog backend's REST API.
///
/// All endpoints answer with the `{status, data, message}` envelope;
/// protected endpoints take a bearer credential.
pub struct HttpMovieGateway {
    client: Client,
    base_url: String,
}

impl HttpMovieGateway {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("reeldeck/0.1")
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(config.api_base_url.clone())
    }

    fn bearer(request: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    fn require_token<'a>(token: Option<&'a AuthToken>) -> AppResult<&'a AuthToken> {
        token.ok_or_else(|| AppError::AuthError("missing bearer credential".to_string()))
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: String,
        token: Option<&AuthToken>,
    ) -> AppResult<ApiEnvelope<T>> {
        debug!("GET {}", url);
        let response = Self::bearer(self.client.get(&url), token)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<ApiEnvelope<T>>().await?)
    }
}

#[async_trait]
impl MovieGateway for HttpMovieGateway {
    async fn fetch_catalog_page(&self, request: PageRequest) -> AppResult<Page<Movie>> {
        let url = format!(
            "{}/movies?page={}&per_page={}",
            self.base_url, request.page, request.per_page
        );
        let envelope: ApiEnvelope<CatalogPageDto> = self.get_envelope(url, None).await?;
        Ok(MovieMapper::page_to_domain(envelope.into_data()?))
    }

    async fn fetch_recommendations(&self, token: Option<&AuthToken>) -> AppResult<Vec<Movie>> {
        let token = Self::require_token(token)?;
        let url = format!("{}/movies/recommendations", self.base_url);
        let envelope: ApiEnvelope<Vec<MovieDto>> = self.get_envelope(url, Some(token)).await?;
        Ok(envelope
            .into_data()?
            .into_iter()
            .map(MovieMapper::to_domain)
            .collect())
    }

    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        let url = format!(
            "{}/movies/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let envelope: ApiEnvelope<Vec<MovieDto>> = self.get_envelope(url, None).await?;
        Ok(envelope
            .into_data()?
            .into_iter()
            .map(MovieMapper::to_domain)
            .collect())
    }

    async fn submit_rating(
        &self,
        token: Option<&AuthToken>,
        movie_id: MovieId,
        value: f32,
    ) -> AppResult<()> {
        let token = Self::require_token(token)?;
        let url = format!("{}/movies/rate", self.base_url);
        let body = RateRequestDto {
            movie_id,
            rating: value,
        };
        debug!("POST {} movie={}", url, movie_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        response.json::<ApiEnvelope<serde_json::Value>>().await?.ack()
    }

    async fn toggle_favorite(&self, token: Option<&AuthToken>, movie_id: MovieId) -> AppResult<()> {
        let token = Self::require_token(token)?;
        let url = format!("{}/movies/favorite", self.base_url);
        let body = FavoriteRequestDto { movie_id };
        debug!("POST {} movie={}", url, movie_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        response.json::<ApiEnvelope<serde_json::Value>>().await?.ack()
    }

    async fn fetch_featured(&self) -> AppResult<Vec<Movie>> {
        let url = format!("{}/movies/featured", self.base_url);
        let envelope: ApiEnvelope<Vec<MovieDto>> = self.get_envelope(url, None).await?;
        Ok(envelope
            .into_data()?
            .into_iter()
            .map(MovieMapper::to_domain)
            .collect())
    }
}
