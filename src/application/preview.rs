use tracing::debug;

use crate::application::content::{ContentError, ContentPipeline, ContentSurface};
use crate::application::render::Analysis;

/// Runs unsaved content through the same pipeline used when posts are stored.
#[derive(Clone)]
pub struct PreviewService {
    content: ContentPipeline,
}

impl PreviewService {
    pub fn new(content: ContentPipeline) -> Self {
        Self { content }
    }

    pub fn preview(&self, content: &str) -> Result<Analysis, ContentError> {
        let analysis = self.content.analyze(content, ContentSurface::Preview)?;

        debug!(
            target = "quire::application::preview",
            bytes = content.len(),
            word_count = analysis.word_count,
            headings = analysis.headings.len(),
            images = analysis.images.len(),
            "Preview rendered"
        );

        Ok(analysis)
    }
}
