use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the four content sources the view layer is currently showing.
/// Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentView {
    Catalog,
    Recommendations,
    Favorites,
    SearchResults,
}

impl ContentView {
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentView::Catalog => "All Movies",
            ContentView::Recommendations => "Recommendations",
            ContentView::Favorites => "Favorites",
            ContentView::SearchResults => "Search Results",
        }
    }

    /// Views that own a gateway fetch when selected. `Favorites` and
    /// `SearchResults` render from data already held in memory.
    pub fn triggers_fetch(&self) -> bool {
        matches!(self, ContentView::Catalog | ContentView::Recommendations)
    }
}

impl fmt::Display for ContentView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
