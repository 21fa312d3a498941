//! Application state shared across handlers

use std::sync::Arc;

use crate::store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Share a store the caller keeps a handle to.
    pub fn from_arc(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}
