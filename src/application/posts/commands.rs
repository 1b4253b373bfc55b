use tracing::info;
use uuid::Uuid;

use crate::application::content::ContentSurface;
use crate::application::render::Analysis;
use crate::application::repos::{CreatePostParams, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::slug::{SlugAsyncError, SlugError, derive_slug, generate_unique_slug_async};
use crate::domain::types::PostStatus;

use super::service::PostService;
use super::types::{
    CreatePostCommand, PostServiceError, UpdatePostCommand, ensure_non_empty, explicit_text,
    publication_timestamp,
};

impl PostService {
    pub async fn create_post(
        &self,
        command: CreatePostCommand,
    ) -> Result<PostRecord, PostServiceError> {
        ensure_non_empty(&command.title, "title")?;
        ensure_non_empty(&command.content, "content")?;

        let analysis = self.content.analyze(&command.content, ContentSurface::Post)?;
        let slug = self.unique_slug(&command.title).await?;
        let excerpt =
            explicit_text(command.excerpt.as_deref()).unwrap_or_else(|| analysis.excerpt.clone());

        let params = CreatePostParams {
            slug,
            title: command.title.trim().to_string(),
            content: command.content,
            content_html: analysis.html,
            excerpt,
            featured_image: explicit_text(command.featured_image.as_deref()),
            word_count: analysis.word_count,
            reading_time: analysis.reading_time,
            status: command.status,
            published_at: publication_timestamp(command.status, None),
        };

        let post = self.writer.create_post(params).await?;

        info!(
            target = "quire::application::posts",
            post_id = %post.id,
            slug = %post.slug,
            status = post.status.as_str(),
            word_count = post.word_count,
            "Post created"
        );

        Ok(post)
    }

    pub async fn update_post(
        &self,
        command: UpdatePostCommand,
    ) -> Result<PostRecord, PostServiceError> {
        let current = self
            .reader
            .find_by_id(command.id)
            .await?
            .ok_or(PostServiceError::NotFound)?;

        let title = match command.title.as_deref() {
            Some(title) => {
                ensure_non_empty(title, "title")?;
                title.trim().to_string()
            }
            None => current.title.clone(),
        };

        let slug = match command.slug.as_deref() {
            Some(requested) => self.claim_slug(&current, requested).await?,
            None => current.slug.clone(),
        };

        let explicit_excerpt = explicit_text(command.excerpt.as_deref());
        let content_changed = command
            .content
            .as_deref()
            .is_some_and(|content| content != current.content);

        let (content, derived) = match command.content {
            Some(content) if content_changed => {
                ensure_non_empty(&content, "content")?;
                let analysis = self.content.analyze(&content, ContentSurface::Post)?;
                (content, Some(analysis))
            }
            _ => (current.content.clone(), None),
        };

        let excerpt = match (&derived, explicit_excerpt, command.excerpt.is_some()) {
            (_, Some(explicit), _) => explicit,
            (Some(analysis), None, _) => analysis.excerpt.clone(),
            // A blank excerpt asks for the derived one again.
            (None, None, true) => self.content.analyze(&content, ContentSurface::Post)?.excerpt,
            (None, None, false) => current.excerpt.clone(),
        };

        let (content_html, word_count, reading_time) = match derived {
            Some(Analysis {
                html,
                word_count,
                reading_time,
                ..
            }) => (html, word_count, reading_time),
            None => (
                current.content_html.clone(),
                current.word_count,
                current.reading_time,
            ),
        };

        let featured_image = match command.featured_image.as_deref() {
            Some(image) => explicit_text(Some(image)),
            None => current.featured_image.clone(),
        };

        let status = command.status.unwrap_or(current.status);

        let params = UpdatePostParams {
            id: current.id,
            slug,
            title,
            content,
            content_html,
            excerpt,
            featured_image,
            word_count,
            reading_time,
            status,
            published_at: publication_timestamp(status, current.published_at),
        };

        let post = self.writer.update_post(params).await?;

        info!(
            target = "quire::application::posts",
            post_id = %post.id,
            slug = %post.slug,
            status = post.status.as_str(),
            content_changed,
            "Post updated"
        );

        Ok(post)
    }

    pub async fn publish_post(&self, id: Uuid) -> Result<PostRecord, PostServiceError> {
        self.change_status(id, PostStatus::Published).await
    }

    pub async fn unpublish_post(&self, id: Uuid) -> Result<PostRecord, PostServiceError> {
        self.change_status(id, PostStatus::Draft).await
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), PostServiceError> {
        self.writer.delete_post(id).await?;

        info!(
            target = "quire::application::posts",
            post_id = %id,
            "Post deleted"
        );

        Ok(())
    }

    async fn change_status(
        &self,
        id: Uuid,
        status: PostStatus,
    ) -> Result<PostRecord, PostServiceError> {
        self.update_post(UpdatePostCommand {
            id,
            status: Some(status),
            ..UpdatePostCommand::default()
        })
        .await
    }

    async fn unique_slug(&self, title: &str) -> Result<String, PostServiceError> {
        let reader = self.reader.clone();
        match generate_unique_slug_async(title, move |candidate| {
            let reader = reader.clone();
            let candidate = candidate.to_string();
            async move {
                reader
                    .find_by_slug(&candidate)
                    .await
                    .map(|existing| existing.is_none())
            }
        })
        .await
        {
            Ok(slug) => Ok(slug),
            Err(SlugAsyncError::Slug(err)) => Err(slug_violation(err)),
            Err(SlugAsyncError::Predicate(err)) => Err(PostServiceError::Repo(err)),
        }
    }

    /// Normalise a requested slug and make sure no other post owns it.
    async fn claim_slug(
        &self,
        current: &PostRecord,
        requested: &str,
    ) -> Result<String, PostServiceError> {
        let slug =
            derive_slug(requested).map_err(|_| PostServiceError::ConstraintViolation("slug"))?;
        if slug == current.slug {
            return Ok(slug);
        }

        match self.reader.find_by_slug(&slug).await? {
            Some(owner) if owner.id != current.id => {
                Err(PostServiceError::ConstraintViolation("slug"))
            }
            _ => Ok(slug),
        }
    }
}

fn slug_violation(err: SlugError) -> PostServiceError {
    match err {
        SlugError::EmptyInput | SlugError::Unrepresentable { .. } => {
            PostServiceError::ConstraintViolation("title")
        }
        SlugError::Exhausted { .. } => PostServiceError::ConstraintViolation("slug"),
    }
}
