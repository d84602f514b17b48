use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::llm_client::ResourceAdvisor;
use crate::places::PlaceSearch;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Provider chosen by `LLM_PROVIDER`.
    pub advisor: Arc<dyn ResourceAdvisor>,
    /// `None` when places lookups are disabled.
    pub places: Option<Arc<dyn PlaceSearch>>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: Config,
        advisor: Arc<dyn ResourceAdvisor>,
        places: Option<Arc<dyn PlaceSearch>>,
    ) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
        Self {
            config,
            advisor,
            places,
            sessions,
        }
    }
}
