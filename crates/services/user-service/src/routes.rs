//! Route configuration.

use axum::{middleware, routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{method_not_allowed, request_trace_layer, require_api_key, ApiKeyAuth};

use crate::handlers::{create_user, delete_user, get_user, health, list_users, update_user};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the router.
///
/// `/users` routes require the API key; `/health` and the docs do not.
/// A trailing slash after the id is accepted.
pub fn create_router(state: AppState, auth: ApiKeyAuth) -> Router {
    let user_by_id = get(get_user)
        .put(update_user)
        .patch(update_user)
        .delete(delete_user)
        .fallback(method_not_allowed);

    let users: Router<AppState> = Router::new()
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route("/users/:id", user_by_id.clone())
        .route("/users/:id/", user_by_id)
        .route_layer(middleware::from_fn_with_state(auth, require_api_key));

    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(users)
        .layer(request_trace_layer())
        .with_state(state)
}
