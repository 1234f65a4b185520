use std::path::PathBuf;
use std::sync::Arc;

use meddevvi_export::error::ExportError;
use meddevvi_export::pages::Pages;
use meddevvi_storage::facility::FacilityStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FacilityStore>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        Ok(Self {
            store: Arc::new(FacilityStore::new(data_dir)),
            pages: Arc::new(Pages::new()?),
        })
    }
}
