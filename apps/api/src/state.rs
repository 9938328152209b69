use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    /// Pluggable generation backend. Default: `OllamaClient`; any
    /// `TextGenerator` can be substituted without touching pipeline code.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
