//! Metered entry point into the markdown pipeline shared by posts and previews.

use std::{sync::Arc, time::Instant};

use metrics::{counter, histogram};
use thiserror::Error;

use crate::application::render::{Analysis, ContentLimits, RenderError, RenderService};

pub(crate) const METRIC_RENDER_TOTAL: &str = "quire_render_total";
pub(crate) const METRIC_RENDER_FAILURES_TOTAL: &str = "quire_render_failures_total";
pub(crate) const METRIC_RENDER_MS: &str = "quire_render_ms";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is {actual} bytes; the limit is {limit}")]
    TooLarge { limit: usize, actual: usize },
    #[error("invalid markdown: {0}")]
    Invalid(#[from] RenderError),
}

/// Which caller asked for the analysis; used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSurface {
    Post,
    Preview,
}

impl ContentSurface {
    fn as_str(self) -> &'static str {
        match self {
            ContentSurface::Post => "post",
            ContentSurface::Preview => "preview",
        }
    }
}

#[derive(Clone)]
pub struct ContentPipeline {
    renderer: Arc<dyn RenderService>,
    limits: ContentLimits,
}

impl ContentPipeline {
    pub fn new(renderer: Arc<dyn RenderService>, limits: ContentLimits) -> Self {
        Self { renderer, limits }
    }

    /// Bound, validate and analyse `content` using the configured excerpt budget.
    pub fn analyze(
        &self,
        content: &str,
        surface: ContentSurface,
    ) -> Result<Analysis, ContentError> {
        if !self.limits.allows(content) {
            return Err(ContentError::TooLarge {
                limit: self.limits.max_bytes,
                actual: content.len(),
            });
        }

        let started_at = Instant::now();
        let outcome = self.renderer.analyze(content, self.limits.excerpt_chars);

        counter!(METRIC_RENDER_TOTAL, "surface" => surface.as_str()).increment(1);
        histogram!(METRIC_RENDER_MS, "surface" => surface.as_str())
            .record(started_at.elapsed().as_secs_f64() * 1000.0);
        if outcome.is_err() {
            counter!(METRIC_RENDER_FAILURES_TOTAL, "surface" => surface.as_str()).increment(1);
        }

        outcome.map_err(ContentError::from)
    }
}
