use std::sync::Arc;

use crate::app_state::AppState;

/// Shared context handed to every handler via axum state.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}
