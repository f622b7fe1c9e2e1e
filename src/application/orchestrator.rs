use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::movie::{Movie, MovieId};
use crate::domain::repositories::MovieGateway;
use crate::domain::value_objects::{AuthToken, ContentView, FetchFailure, FetchKind, FetchState};
use crate::infrastructure::cache::PosterResolver;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::pagination::PageRequest;

/// Point-in-time view of the orchestrator, handed to the view layer after
/// each operation.
#[derive(Debug, Clone)]
pub struct ContentSnapshot {
    pub active_view: ContentView,
    /// Derived list for the active view, deduplicated by movie id.
    pub items: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub favorites: HashSet<MovieId>,
    pub loading: bool,
    pub error: Option<FetchFailure>,
}

#[derive(Debug)]
struct ContentState {
    active_view: ContentView,
    /// Last non-search view; an empty search falls back here.
    fallback_view: ContentView,
    catalog: Vec<Movie>,
    recommendations: Vec<Movie>,
    search_results: Vec<Movie>,
    /// Most recently issued query; repeats of it are not re-fetched.
    pending_query: Option<String>,
    favorites: HashSet<MovieId>,
    page: u32,
    total_pages: u32,
    fetch: FetchState,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            active_view: ContentView::Catalog,
            fallback_view: ContentView::Catalog,
            catalog: Vec::new(),
            recommendations: Vec::new(),
            search_results: Vec::new(),
            pending_query: None,
            favorites: HashSet::new(),
            page: 1,
            total_pages: 1,
            fetch: FetchState::default(),
        }
    }
}

impl ContentState {
    fn derived_items(&self) -> Vec<Movie> {
        let source: Vec<Movie> = match self.active_view {
            ContentView::Catalog => self.catalog.clone(),
            ContentView::Recommendations => self.recommendations.clone(),
            ContentView::Favorites => self
                .catalog
                .iter()
                .filter(|movie| self.favorites.contains(&movie.id))
                .cloned()
                .collect(),
            ContentView::SearchResults => self.search_results.clone(),
        };
        dedup_by_id(source)
    }
}

/// Single source of truth for "what list of movies is currently shown".
///
/// Reconciles the paginated catalog, recommendations, favorites, and
/// search results behind one active `ContentView`, and guards every
/// asynchronous fetch against stale or out-of-order completion: each slot
/// (catalog, recommendations, search) carries a sequence counter, a fetch
/// captures the next value on issue, and its payload commits only while
/// that value is still the newest. Superseded work is abandoned, never
/// aborted.
pub struct ContentOrchestrator {
    gateway: Arc<dyn MovieGateway>,
    posters: Option<Arc<PosterResolver>>,
    token: Option<AuthToken>,
    per_page: u32,
    state: RwLock<ContentState>,
    catalog_seq: AtomicU64,
    recommendations_seq: AtomicU64,
    search_seq: AtomicU64,
    in_flight: AtomicUsize,
}

impl ContentOrchestrator {
    pub fn new(
        gateway: Arc<dyn MovieGateway>,
        posters: Option<Arc<PosterResolver>>,
        token: Option<AuthToken>,
        per_page: u32,
    ) -> Self {
        Self {
            gateway,
            posters,
            token,
            per_page,
            state: RwLock::new(ContentState::default()),
            catalog_seq: AtomicU64::new(0),
            recommendations_seq: AtomicU64::new(0),
            search_seq: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Switch the active view. `Catalog` resets pagination to page 1 and
    /// refetches it; `Recommendations` refetches the recommendation list;
    /// `Favorites` and `SearchResults` render from data already held.
    pub async fn select_view(&self, view: ContentView) -> AppResult<()> {
        {
            let mut st = self.state.write().await;
            st.active_view = view;
            if view != ContentView::SearchResults {
                st.fallback_view = view;
            }
            if view == ContentView::Catalog {
                st.page = 1;
            }
        }

        match view {
            ContentView::Catalog => self.load_catalog_page(1).await,
            ContentView::Recommendations => self.refresh_recommendations().await,
            _ => Ok(()),
        }
    }

    /// Jump to a catalog page. Valid only while the catalog view is
    /// active and `1 <= page <= total_pages`; anything else is rejected
    /// without touching the gateway.
    pub async fn select_page(&self, page: u32) -> AppResult<()> {
        {
            let st = self.state.read().await;
            if st.active_view != ContentView::Catalog {
                drop(st);
                return self
                    .reject(
                        FetchKind::CatalogPage,
                        "page selection requires the catalog view".to_string(),
                    )
                    .await;
            }
            if page < 1 || page > st.total_pages {
                let total = st.total_pages;
                drop(st);
                return self
                    .reject(
                        FetchKind::CatalogPage,
                        format!("page {} out of range 1..={}", page, total),
                    )
                    .await;
            }
        }

        self.load_catalog_page(page).await
    }

    /// Submit a rating. On gateway success the recommendation list is
    /// refetched (ratings change future recommendations); on failure the
    /// displayed rating is left as-is and the error is surfaced.
    pub async fn rate(&self, movie_id: MovieId, value: f32) -> AppResult<()> {
        if !is_valid_rating(value) {
            return self
                .reject(
                    FetchKind::Rating,
                    format!("rating {} must be between 0 and 5 in 0.5 steps", value),
                )
                .await;
        }

        match self
            .gateway
            .submit_rating(self.token.as_ref(), movie_id, value)
            .await
        {
            Ok(()) => {
                self.state.write().await.fetch.clear_if(FetchKind::Rating);
                self.refresh_recommendations().await
            }
            Err(err) => {
                warn!("rating submission for movie {} failed: {}", movie_id, err);
                self.state
                    .write()
                    .await
                    .fetch
                    .record(FetchKind::Rating, err.clone());
                Err(err)
            }
        }
    }

    /// Toggle favorite membership. The local set changes only after the
    /// gateway confirms; success also refreshes recommendations.
    pub async fn favorite(&self, movie_id: MovieId) -> AppResult<()> {
        match self
            .gateway
            .toggle_favorite(self.token.as_ref(), movie_id)
            .await
        {
            Ok(()) => {
                {
                    let mut st = self.state.write().await;
                    if !st.favorites.insert(movie_id) {
                        st.favorites.remove(&movie_id);
                    }
                    st.fetch.clear_if(FetchKind::Favorite);
                }
                self.refresh_recommendations().await
            }
            Err(err) => {
                warn!("favorite toggle for movie {} failed: {}", movie_id, err);
                self.state
                    .write()
                    .await
                    .fetch
                    .record(FetchKind::Favorite, err.clone());
                Err(err)
            }
        }
    }

    /// Run a search. A trimmed-empty query clears the results and falls
    /// back to the view that was active before `SearchResults`; a repeat
    /// of the query already issued is a no-op.
    pub async fn search(&self, query: &str) -> AppResult<()> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let mut st = self.state.write().await;
            st.search_results.clear();
            st.pending_query = None;
            if st.active_view == ContentView::SearchResults {
                st.active_view = st.fallback_view;
            }
            return Ok(());
        }

        let seq = {
            let mut st = self.state.write().await;
            if st.pending_query.as_deref() == Some(trimmed) {
                debug!("duplicate search for {:?} ignored", trimmed);
                return Ok(());
            }
            st.pending_query = Some(trimmed.to_string());
            self.search_seq.fetch_add(1, Ordering::SeqCst) + 1
        };

        self.begin_fetch().await;
        let result = match self.gateway.search_movies(trimmed).await {
            Ok(movies) => Ok(self.fill_posters(movies).await),
            Err(err) => Err(err),
        };

        let mut st = self.state.write().await;
        self.end_fetch(&mut st);
        if self.search_seq.load(Ordering::SeqCst) != seq {
            debug!("discarding superseded search response for {:?}", trimmed);
            return Ok(());
        }

        match result {
            Ok(movies) => {
                st.search_results = movies;
                if st.active_view != ContentView::SearchResults {
                    st.fallback_view = st.active_view;
                    st.active_view = ContentView::SearchResults;
                }
                st.fetch.clear_if(FetchKind::Search);
                Ok(())
            }
            Err(err) => {
                warn!("search for {:?} failed: {}", trimmed, err);
                // allow the same query to be retried
                st.pending_query = None;
                st.fetch.record(FetchKind::Search, err.clone());
                Err(err)
            }
        }
    }

    /// Editorial featured list for the landing view. A one-off read: it
    /// never touches the tabbed view state, and errors propagate to the
    /// caller instead of the shared fetch state.
    pub async fn featured(&self) -> AppResult<Vec<Movie>> {
        let movies = self.gateway.fetch_featured().await?;
        Ok(dedup_by_id(self.fill_posters(movies).await))
    }

    /// Snapshot of everything the view layer renders.
    pub async fn get_state(&self) -> ContentSnapshot {
        let st = self.state.read().await;
        ContentSnapshot {
            active_view: st.active_view,
            items: st.derived_items(),
            page: st.page,
            total_pages: st.total_pages,
            favorites: st.favorites.clone(),
            loading: st.fetch.loading,
            error: st.fetch.error.clone(),
        }
    }

    /// The derived list for the active view, deduplicated by id.
    pub async fn current_content(&self) -> Vec<Movie> {
        self.state.read().await.derived_items()
    }

    async fn load_catalog_page(&self, page: u32) -> AppResult<()> {
        let seq = self.catalog_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin_fetch().await;

        let request = PageRequest::new(page, self.per_page);
        let result = match self.gateway.fetch_catalog_page(request).await {
            Ok(fetched) => Ok((self.fill_posters(fetched.items).await, fetched.total_pages)),
            Err(err) => Err(err),
        };

        let mut st = self.state.write().await;
        self.end_fetch(&mut st);
        if self.catalog_seq.load(Ordering::SeqCst) != seq {
            debug!("discarding superseded catalog response for page {}", page);
            return Ok(());
        }

        match result {
            Ok((movies, total_pages)) => {
                st.catalog = movies;
                st.page = page;
                st.total_pages = total_pages.max(1);
                st.fetch.clear_if(FetchKind::CatalogPage);
                Ok(())
            }
            Err(err) => {
                warn!("catalog page {} fetch failed: {}", page, err);
                st.fetch.record(FetchKind::CatalogPage, err.clone());
                Err(err)
            }
        }
    }

    async fn refresh_recommendations(&self) -> AppResult<()> {
        let seq = self.recommendations_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin_fetch().await;

        let result = match self.gateway.fetch_recommendations(self.token.as_ref()).await {
            Ok(movies) => Ok(self.fill_posters(movies).await),
            Err(err) => Err(err),
        };

        let mut st = self.state.write().await;
        self.end_fetch(&mut st);
        if self.recommendations_seq.load(Ordering::SeqCst) != seq {
            debug!("discarding superseded recommendations response");
            return Ok(());
        }

        match result {
            Ok(movies) => {
                st.recommendations = movies;
                st.fetch.clear_if(FetchKind::Recommendations);
                Ok(())
            }
            Err(err) => {
                // keep the last good list on screen
                warn!("recommendations refresh failed: {}", err);
                st.fetch.record(FetchKind::Recommendations, err.clone());
                Err(err)
            }
        }
    }

    async fn reject(&self, kind: FetchKind, message: String) -> AppResult<()> {
        let err = AppError::ValidationError(message);
        self.state.write().await.fetch.record(kind, err.clone());
        Err(err)
    }

    async fn begin_fetch(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.write().await.fetch.loading = true;
    }

    fn end_fetch(&self, st: &mut ContentState) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        st.fetch.loading = remaining > 0;
    }

    /// Fill in posters the gateway payload lacks, cache first. Resolution
    /// failures leave the poster absent; they never fail the fetch.
    async fn fill_posters(&self, movies: Vec<Movie>) -> Vec<Movie> {
        let Some(resolver) = &self.posters else {
            return movies;
        };

        join_all(movies.into_iter().map(|mut movie| async move {
            if !movie.has_poster() {
                movie.poster_url = resolver.resolve(movie.id, &movie.title).await;
            }
            movie
        }))
        .await
    }
}

/// First occurrence wins; the gateway may return the same movie across
/// overlapping result sets.
fn dedup_by_id(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies
        .into_iter()
        .filter(|movie| seen.insert(movie.id))
        .collect()
}

fn is_valid_rating(value: f32) -> bool {
    if !(0.0..=5.0).contains(&value) {
        return false;
    }
    let doubled = value * 2.0;
    (doubled - doubled.round()).abs() < f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            year: Some(2000),
            genres: vec!["Drama".to_string()],
            rating: 3.5,
            rating_count: 1,
            poster_url: None,
            user_rating: None,
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut first = movie(1);
        first.title = "first".to_string();
        let mut dup = movie(1);
        dup.title = "second".to_string();

        let deduped = dedup_by_id(vec![first, movie(2), dup]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
    }

    #[test]
    fn rating_steps_of_half_are_valid() {
        for valid in [0.0, 0.5, 2.5, 4.5, 5.0] {
            assert!(is_valid_rating(valid), "{} should be valid", valid);
        }
        for invalid in [-0.5, 4.3, 5.5, 2.25] {
            assert!(!is_valid_rating(invalid), "{} should be invalid", invalid);
        }
    }
}
