use uuid::Uuid;

use crate::application::repos::{PostListQuery, PostPage};
use crate::domain::entities::PostRecord;

use super::service::PostService;
use super::types::PostServiceError;

const MAX_PAGE_SIZE: u32 = 100;

/// Page size actually served for a requested `limit`.
pub fn page_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

impl PostService {
    pub async fn list(&self, mut query: PostListQuery) -> Result<PostPage, PostServiceError> {
        query.limit = page_limit(query.limit);
        self.reader
            .list_posts(query)
            .await
            .map_err(PostServiceError::from)
    }

    pub async fn load_post(&self, id: Uuid) -> Result<PostRecord, PostServiceError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound)
    }

    /// Public lookup by slug; every hit counts as a view.
    pub async fn load_by_slug(&self, slug: &str) -> Result<PostRecord, PostServiceError> {
        let mut post = self
            .reader
            .find_by_slug(slug)
            .await?
            .ok_or(PostServiceError::NotFound)?;

        self.writer.increment_view_count(post.id).await?;
        post.view_count += 1;

        Ok(post)
    }
}
