use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::core::lookup::LookupService;

pub type SharedLookup = Arc<LookupService>;

#[derive(Clone)]
pub struct AppState {
    pub lookup: SharedLookup,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self {
            lookup: Arc::new(lookup),
            start_time: Instant::now(),
        }
    }
}

impl FromRef<AppState> for SharedLookup {
    fn from_ref(input: &AppState) -> Self {
        input.lookup.clone()
    }
}
