use std::sync::Arc;

use crate::ports::TaskStore;

/// handler 間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub token: Arc<str>,
}
