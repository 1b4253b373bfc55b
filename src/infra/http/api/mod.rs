pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::infra::http::middleware::log_responses;

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/api/v1/posts/preview", post(handlers::preview_post))
        .route(
            "/api/v1/posts/{id}",
            get(handlers::get_post_by_id)
                .patch(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/api/v1/posts/{id}/publish", post(handlers::publish_post))
        .route(
            "/api/v1/posts/{id}/unpublish",
            post(handlers::unpublish_post),
        )
        .route("/api/v1/posts/slug/{slug}", get(handlers::get_post))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
}
