use std::sync::Arc;

use crate::config::Config;
use crate::engine::SnippetService;
use crate::observability::Metrics;
use crate::store::FjallSnippetStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: SnippetService<FjallSnippetStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, store: FjallSnippetStore) -> Self {
        Self {
            config: Arc::new(config),
            service: SnippetService::new(Arc::new(store)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
