use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::{content::ContentError, repos::RepoError},
    domain::types::PostStatus,
};

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("`{0}` is missing or invalid")]
    ConstraintViolation(&'static str),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    /// Used verbatim when non-blank; otherwise derived from `content`.
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: PostStatus,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: Uuid,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    /// An empty string clears the image.
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
}

pub fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), PostServiceError> {
    if value.trim().is_empty() {
        return Err(PostServiceError::ConstraintViolation(field));
    }
    Ok(())
}

/// Non-blank, trimmed author text or `None`.
pub(crate) fn explicit_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// `published_at` is stamped the first time a post is published and kept afterwards.
pub(crate) fn publication_timestamp(
    status: PostStatus,
    current: Option<OffsetDateTime>,
) -> Option<OffsetDateTime> {
    match (status, current) {
        (_, Some(stamped)) => Some(stamped),
        (PostStatus::Published, None) => Some(OffsetDateTime::now_utc()),
        (PostStatus::Draft | PostStatus::Archived, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn explicit_text_ignores_blank_values() {
        assert_eq!(explicit_text(None), None);
        assert_eq!(explicit_text(Some("   ")), None);
        assert_eq!(explicit_text(Some(" Hand written ")), Some("Hand written".to_string()));
    }

    #[test]
    fn publication_timestamp_is_set_once() {
        let first = datetime!(2024-01-01 0:00 UTC);
        assert_eq!(publication_timestamp(PostStatus::Draft, None), None);
        assert!(publication_timestamp(PostStatus::Published, None).is_some());
        assert_eq!(
            publication_timestamp(PostStatus::Published, Some(first)),
            Some(first)
        );
        assert_eq!(
            publication_timestamp(PostStatus::Draft, Some(first)),
            Some(first)
        );
    }

    #[test]
    fn ensure_non_empty_names_the_field() {
        assert!(matches!(
            ensure_non_empty(" ", "title"),
            Err(PostServiceError::ConstraintViolation("title"))
        ));
    }
}
