//! In-process post storage backing both the binary and the integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{
    CreatePostParams, PostListQuery, PostPage, PostsRepo, PostsWriteRepo, RepoError,
    UpdatePostParams,
};
use crate::domain::entities::PostRecord;

const SLUG_CONSTRAINT: &str = "posts_slug_key";

#[derive(Debug, Default)]
pub struct InMemoryPostsRepo {
    posts: RwLock<HashMap<Uuid, PostRecord>>,
}

impl InMemoryPostsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(posts: &HashMap<Uuid, PostRecord>, slug: &str, except: Option<Uuid>) -> bool {
    posts
        .values()
        .any(|post| post.slug == slug && Some(post.id) != except)
}

#[async_trait]
impl PostsRepo for InMemoryPostsRepo {
    async fn list_posts(&self, query: PostListQuery) -> Result<PostPage, RepoError> {
        let posts = self.posts.read().await;

        let mut matching: Vec<&PostRecord> = posts
            .values()
            .filter(|post| query.status.is_none_or(|status| post.status == status))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let posts = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(PostPage { posts, total })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().find(|post| post.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryPostsRepo {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        if slug_taken(&posts, &params.slug, None) {
            return Err(RepoError::Duplicate {
                constraint: SLUG_CONSTRAINT.to_string(),
            });
        }

        let now = OffsetDateTime::now_utc();
        let record = PostRecord {
            id: Uuid::new_v4(),
            slug: params.slug,
            title: params.title,
            content: params.content,
            content_html: params.content_html,
            excerpt: params.excerpt,
            featured_image: params.featured_image,
            word_count: params.word_count,
            reading_time: params.reading_time,
            status: params.status,
            view_count: 0,
            published_at: params.published_at,
            created_at: now,
            updated_at: now,
        };

        posts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        if slug_taken(&posts, &params.slug, Some(params.id)) {
            return Err(RepoError::Duplicate {
                constraint: SLUG_CONSTRAINT.to_string(),
            });
        }

        let record = posts.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        record.slug = params.slug;
        record.title = params.title;
        record.content = params.content;
        record.content_html = params.content_html;
        record.excerpt = params.excerpt;
        record.featured_image = params.featured_image;
        record.word_count = params.word_count;
        record.reading_time = params.reading_time;
        record.status = params.status;
        record.published_at = params.published_at;
        record.updated_at = OffsetDateTime::now_utc();

        Ok(record.clone())
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let record = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        record.view_count = record.view_count.saturating_add(1);
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
