//! Posts handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::posts::{CreatePostCommand, UpdatePostCommand, page_limit};
use crate::application::repos::PostListQuery as RepoListQuery;

use super::{PostListQuery, post_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

pub async fn list_posts(
    State(state): State<ApiState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let defaults = RepoListQuery::default();
    let request = RepoListQuery {
        status: query.status,
        limit: page_limit(query.limit.unwrap_or(defaults.limit)),
        offset: query.offset.unwrap_or(defaults.offset),
    };

    let page = state.posts.list(request).await.map_err(post_to_api)?;

    Ok(Json(PostListResponse {
        posts: page.posts,
        total: page.total,
        limit: request.limit,
        offset: request.offset,
    }))
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .posts
        .load_by_slug(&slug)
        .await
        .map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn get_post_by_id(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.load_post(id).await.map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Json(payload): Json<PostCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreatePostCommand {
        title: payload.title,
        content: payload.content,
        excerpt: payload.excerpt,
        featured_image: payload.featured_image,
        status: payload.status,
    };

    let post = state
        .posts
        .create_post(command)
        .await
        .map_err(post_to_api)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        slug: payload.slug,
        content: payload.content,
        excerpt: payload.excerpt,
        featured_image: payload.featured_image,
        status: payload.status,
    };

    let post = state
        .posts
        .update_post(command)
        .await
        .map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn publish_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.publish_post(id).await.map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn unpublish_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.unpublish_post(id).await.map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.delete_post(id).await.map_err(post_to_api)?;

    Ok(StatusCode::NO_CONTENT)
}
