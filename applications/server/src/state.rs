/// Shared application state
use crate::services::AuthService;
use roster_core::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, auth_service: Arc<AuthService>) -> Self {
        Self {
            store,
            auth_service,
        }
    }
}
