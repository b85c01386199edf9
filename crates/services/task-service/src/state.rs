//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::TaskStore;

#[derive(Clone, Default)]
pub struct AppState {
    pub tasks: Arc<TaskStore>,
}

impl AppState {
    pub fn new(tasks: Arc<TaskStore>) -> Self {
        Self { tasks }
    }
}
