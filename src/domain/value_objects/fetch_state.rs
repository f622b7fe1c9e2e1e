use crate::shared::errors::AppError;
use serde::Serialize;

/// Operation class a fetch or validation belongs to. Failures are keyed by
/// class so a later success of the same class clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    CatalogPage,
    Recommendations,
    Search,
    Rating,
    Favorite,
}

/// The most recent failed operation, surfaced to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub kind: FetchKind,
    pub error: AppError,
}

/// Loading/error state shared by all views. One instance per orchestrator:
/// the indicator describes the orchestrator as a whole, not a single tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchState {
    pub loading: bool,
    pub error: Option<FetchFailure>,
}

impl FetchState {
    /// Overwrite the surfaced failure; at most one is visible at a time.
    pub(crate) fn record(&mut self, kind: FetchKind, error: AppError) {
        self.error = Some(FetchFailure { kind, error });
    }

    /// A successful operation clears only a failure of its own class.
    pub(crate) fn clear_if(&mut self, kind: FetchKind) {
        if self
            .error
            .as_ref()
            .is_some_and(|failure| failure.kind == kind)
        {
            self.error = None;
        }
    }
}
