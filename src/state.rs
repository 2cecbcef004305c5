use crate::client::{HoursApi, HttpHoursApi};
use crate::storage::HoursStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Backs the `/api/hours` resource.
    pub store: HoursStore,
    /// What the pages talk to: the local store or a remote API.
    pub api: Arc<dyn HoursApi>,
}

impl AppState {
    pub fn new(store: HoursStore, api: Arc<dyn HoursApi>) -> Self {
        Self { store, api }
    }

    pub fn local(store: HoursStore) -> Self {
        let api: Arc<dyn HoursApi> = Arc::new(store.clone());
        Self::new(store, api)
    }

    pub fn remote(store: HoursStore, api_url: &str) -> Self {
        Self::new(store, Arc::new(HttpHoursApi::new(api_url)))
    }
}
