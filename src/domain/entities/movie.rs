use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the backend catalog.
pub type MovieId = i64;

/// Read projection of a movie as served by the gateway.
///
/// The orchestrator never mutates movies; what the user sees is whatever
/// the most recent relevant fetch returned. `rating` is the aggregate on a
/// 0-5 scale with one decimal of precision; `user_rating` is present only
/// when the current user has rated the movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    /// Ordered as reported by the gateway; genres repeat across movies.
    pub genres: Vec<String>,
    pub rating: f32,
    pub rating_count: u32,
    pub poster_url: Option<String>,
    pub user_rating: Option<f32>,
}

impl Movie {
    pub fn has_poster(&self) -> bool {
        self.poster_url.is_some()
    }
}
