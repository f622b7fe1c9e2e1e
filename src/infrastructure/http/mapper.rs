use crate::domain::entities::movie::Movie;
use crate::infrastructure::http::dto::{CatalogPageDto, MovieDto};
use crate::shared::pagination::Page;

/// Translates wire DTOs into domain entities.
pub struct MovieMapper;

impl MovieMapper {
    pub fn to_domain(dto: MovieDto) -> Movie {
        Movie {
            id: dto.id,
            title: dto.title,
            year: dto.year,
            genres: dto.genres,
            rating: dto.rating,
            rating_count: dto.rating_count,
            poster_url: dto.poster_url,
            user_rating: dto.user_rating,
        }
    }

    pub fn page_to_domain(dto: CatalogPageDto) -> Page<Movie> {
        Page {
            items: dto.movies.into_iter().map(Self::to_domain).collect(),
            total_pages: dto.total_pages.max(1),
            current_page: dto.current_page,
            per_page: dto.per_page,
            total_items: dto.total_movies,
        }
    }
}
