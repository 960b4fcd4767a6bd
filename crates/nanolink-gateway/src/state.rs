use nanolink_core::AliasStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    store: Arc<AliasStore>,
    base_url: String,
}

impl AppState {
    pub fn new(store: Arc<AliasStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: public_base_url.into(),
        }
    }

    pub fn store(&self) -> &AliasStore {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
