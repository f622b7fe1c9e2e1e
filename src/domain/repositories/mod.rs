pub mod movie_gateway;
pub mod poster_lookup;
pub mod poster_store;

pub use movie_gateway::MovieGateway;
pub use poster_lookup::PosterLookup;
pub use poster_store::{PosterRecord, PosterStore};
