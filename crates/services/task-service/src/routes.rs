//! Route configuration.

use axum::{middleware, routing::get, Router};

use common::{method_not_allowed, request_trace_layer, require_api_key, ApiKeyAuth};

use crate::handlers::{create_task, get_tasks, update_task};
use crate::state::AppState;

/// Create the router. Every route sits behind the API key check.
pub fn create_router(state: AppState, auth: ApiKeyAuth) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(get_tasks)
                .post(create_task)
                .patch(update_task)
                .fallback(method_not_allowed),
        )
        .layer(middleware::from_fn_with_state(auth, require_api_key))
        .layer(request_trace_layer())
        .with_state(state)
}
