use crate::analysis::pipeline::Pipeline;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Extraction + analysis. The analyzer behind it is chosen in `main`.
    pub pipeline: Pipeline,
    pub config: Config,
}
