use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Success/error envelope every gateway endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the success payload or classify the failure.
    pub fn into_data(self) -> AppResult<T> {
        if self.status == "success" {
            self.data
                .ok_or_else(|| AppError::FormatError("success envelope without data".to_string()))
        } else {
            Err(AppError::FormatError(self.message.unwrap_or_else(|| {
                format!("gateway reported status {:?}", self.status)
            })))
        }
    }

    /// For write endpoints that acknowledge without a payload.
    pub fn ack(self) -> AppResult<()> {
        if self.status == "success" {
            Ok(())
        } else {
            Err(AppError::FormatError(self.message.unwrap_or_else(|| {
                format!("gateway reported status {:?}", self.status)
            })))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(rename = "ratingCount", default)]
    pub rating_count: u32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "posterUrl", default)]
    pub poster_url: Option<String>,
    #[serde(rename = "userRating", default)]
    pub user_rating: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPageDto {
    pub movies: Vec<MovieDto>,
    pub total_pages: u32,
    pub current_page: u32,
    pub per_page: u32,
    pub total_movies: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateRequestDto {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteRequestDto {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope_with_camel_case_movie() {
        let raw = r#"{
            "status": "success",
            "data": [{
                "id": 1,
                "title": "Toy Story (1995)",
                "genres": ["Animation", "Comedy"],
                "rating": 4.2,
                "ratingCount": 215,
                "year": 1995,
                "posterUrl": "http://img/1.jpg"
            }]
        }"#;
        let envelope: ApiEnvelope<Vec<MovieDto>> = serde_json::from_str(raw).unwrap();
        let movies = envelope.into_data().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].rating_count, 215);
        assert_eq!(movies[0].poster_url.as_deref(), Some("http://img/1.jpg"));
        assert_eq!(movies[0].user_rating, None);
    }

    #[test]
    fn error_envelope_carries_server_message() {
        let raw = r#"{"status": "error", "message": "Failed to get recommendations"}"#;
        let envelope: ApiEnvelope<Vec<MovieDto>> = serde_json::from_str(raw).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(
            err,
            AppError::FormatError("Failed to get recommendations".to_string())
        );
    }

    #[test]
    fn success_without_data_is_a_format_error() {
        let raw = r#"{"status": "success"}"#;
        let envelope: ApiEnvelope<CatalogPageDto> = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            envelope.into_data(),
            Err(AppError::FormatError(_))
        ));
    }

    #[test]
    fn ack_accepts_payloadless_success() {
        let raw = r#"{"status": "success"}"#;
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(envelope.ack().is_ok());
    }
}
