use std::sync::Arc;
use turf_store::FacilityStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FacilityStore>,
}

impl AppState {
    pub fn new(store: Arc<FacilityStore>) -> Self {
        Self { store }
    }
}
