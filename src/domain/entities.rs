//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::PostStatus;

/// A stored post. `content_html`, `excerpt`, `word_count` and `reading_time`
/// are denormalised from `content` and rewritten whenever it changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
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
    pub view_count: u64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
