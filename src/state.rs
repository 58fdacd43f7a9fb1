//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::snapshot::{IngestService, RetrievalService};
use crate::store::SnapshotStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    ingest: IngestService,
    retrieval: RetrievalService,
}

impl AppState {
    /// Build the state around an injected store handle. The handle is the
    /// only resource shared between requests.
    pub fn new(config: Config, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                ingest: IngestService::new(Arc::clone(&store)),
                retrieval: RetrievalService::new(store),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn ingest(&self) -> &IngestService {
        &self.inner.ingest
    }

    pub fn retrieval(&self) -> &RetrievalService {
        &self.inner.retrieval
    }
}
