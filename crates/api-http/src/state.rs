use moveops_core::application::MoveExecutionService;
use std::sync::Arc;

/// Shared state handed to every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MoveExecutionService>,
}

impl AppState {
    pub fn new(service: Arc<MoveExecutionService>) -> Self {
        Self { service }
    }
}
