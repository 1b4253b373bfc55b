use std::sync::Arc;

use crate::application::content::ContentPipeline;
use crate::application::repos::{PostsRepo, PostsWriteRepo};

/// Authoring service that keeps a post's derived columns in step with its markdown.
#[derive(Clone)]
pub struct PostService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
    pub(crate) content: ContentPipeline,
}

impl PostService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        content: ContentPipeline,
    ) -> Self {
        Self {
            reader,
            writer,
            content,
        }
    }
}
