pub mod orchestrator;

pub use orchestrator::{ContentOrchestrator, ContentSnapshot};
