//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
}

/// Offset window over posts, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostListQuery {
    pub status: Option<PostStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: 10,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostRecord>,
    pub total: u64,
}

/// Fully derived row ready for insertion.
#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub word_count: u32,
    pub reading_time: u32,
    pub status: PostStatus,
    pub published_at: Option<OffsetDateTime>,
}

/// Complete replacement of a post's mutable columns.
#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub word_count: u32,
    pub reading_time: u32,
    pub status: PostStatus,
    pub published_at: Option<OffsetDateTime>,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn list_posts(&self, query: PostListQuery) -> Result<PostPage, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    async fn increment_view_count(&self, id: Uuid) -> Result<(), RepoError>;

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;
}
