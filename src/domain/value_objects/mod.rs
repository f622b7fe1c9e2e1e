pub mod auth_token;
pub mod content_view;
pub mod fetch_state;

pub use auth_token::AuthToken;
pub use content_view::ContentView;
pub use fetch_state::{FetchFailure, FetchKind, FetchState};
