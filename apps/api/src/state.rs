use std::sync::Arc;

use crate::config::Config;
use crate::search::service::CandidateSearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<CandidateSearch>,
    /// Loaded once at startup; read-only afterwards.
    pub config: Config,
}
