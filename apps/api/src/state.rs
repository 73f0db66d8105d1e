use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ResumeExtractor;
use crate::recommendation::Catalog;
use crate::store::SubmissionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SubmissionStore,
    /// Pluggable extraction backend. Default: HeuristicExtractor. Swap via EXTRACTOR env.
    pub extractor: Arc<dyn ResumeExtractor>,
    pub catalog: Arc<Catalog>,
    pub config: Config,
}
