use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use super::content_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::PreviewRequest;
use crate::infra::http::api::state::ApiState;

/// Render unsaved markdown and return every derived field.
pub async fn preview_post(
    State(state): State<ApiState>,
    Json(payload): Json<PreviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let analysis = state
        .preview
        .preview(&payload.content)
        .map_err(content_to_api)?;

    Ok(Json(analysis))
}
