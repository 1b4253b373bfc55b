use serde::{Deserialize, Serialize};

use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;

fn default_post_status() -> PostStatus {
    PostStatus::Draft
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default = "default_post_status")]
    pub status: PostStatus,
}

/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PreviewRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostRecord>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}
