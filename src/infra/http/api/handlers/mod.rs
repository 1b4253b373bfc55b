//! API handlers organized by resource type.
//!
//! Error conversions shared by the handlers live here.

mod posts;
mod preview;

pub use posts::*;
pub use preview::*;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::application::content::ContentError;
use crate::application::posts::PostServiceError;
use crate::application::repos::RepoError;
use crate::domain::types::PostStatus;

use super::error::{ApiError, codes};

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub status: Option<PostStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Duplicate record",
            Some(constraint),
        ),
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::Persistence(msg) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
            Some(msg),
        ),
    }
}

pub(crate) fn content_to_api(err: ContentError) -> ApiError {
    match err {
        ContentError::TooLarge { .. } => ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            codes::CONTENT_TOO_LARGE,
            "Content too large",
            Some(err.to_string()),
        ),
        ContentError::Invalid(render) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_MARKDOWN,
            "Invalid markdown",
            Some(render.to_string()),
        ),
    }
}

pub(crate) fn post_to_api(err: PostServiceError) -> ApiError {
    match err {
        PostServiceError::ConstraintViolation(field) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid post",
            Some(field.to_string()),
        ),
        PostServiceError::NotFound => ApiError::not_found("post not found"),
        PostServiceError::Content(content) => content_to_api(content),
        PostServiceError::Repo(repo) => repo_to_api(repo),
    }
}
