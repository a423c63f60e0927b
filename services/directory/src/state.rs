//! Application state shared across request handlers.

use std::sync::Arc;

use crate::directory::EndpointDirectory;
use crate::registry::CustomEndpointRegistry;
use crate::store::StateStore;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn StateStore>,
    registry: Arc<CustomEndpointRegistry>,
    directory: EndpointDirectory,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        store: Arc<dyn StateStore>,
        registry: Arc<CustomEndpointRegistry>,
        directory: EndpointDirectory,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                registry,
                directory,
            }),
        }
    }

    /// Get a reference to the state store.
    pub fn store(&self) -> &dyn StateStore {
        &*self.inner.store
    }

    /// Get a reference to the custom endpoint registry.
    pub fn registry(&self) -> &CustomEndpointRegistry {
        &self.inner.registry
    }

    /// Get a reference to the resolution engine.
    pub fn directory(&self) -> &EndpointDirectory {
        &self.inner.directory
    }
}
