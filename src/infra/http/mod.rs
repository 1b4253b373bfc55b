pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};

use axum::{Router, http::StatusCode, middleware as axum_middleware, routing::get};

use self::middleware::set_request_context;

/// Full application router: the JSON API plus a health check.
pub fn build_router(state: ApiState) -> Router {
    build_api_router(state)
        .route("/health", get(health))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}
