//! Application state for the web layer.

use std::sync::Arc;

use crate::service::ClimateService;

/// Shared application state.
pub struct AppState<F> {
    pub service: Arc<ClimateService<F>>,
}

impl<F> AppState<F> {
    pub fn new(service: ClimateService<F>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// Manual impl: `F` itself need not be `Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}
