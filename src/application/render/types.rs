use serde::Serialize;
use thiserror::Error;

use super::outline::{extract_headings, extract_images};
use super::text::{excerpt, strip_markdown};

/// Average adult reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Excerpt budget applied when callers do not supply their own.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// A heading found in the raw markdown, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    /// Fragment identifier; matches the `id` the renderer put on the heading.
    pub id: String,
}

/// Everything derived from a markdown document in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Sanitised HTML ready to serve.
    pub html: String,
    /// Markdown with every syntax marker removed.
    pub plain_text: String,
    pub excerpt: String,
    pub word_count: u32,
    /// Whole minutes, never zero for non-empty text.
    pub reading_time: u32,
    pub images: Vec<String>,
    pub headings: Vec<Heading>,
}

/// The content cannot be turned into a document at all and should be reported
/// to the author as invalid. Covers both HTML formatting and the rewrite pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("markdown parsing failed: {message}")]
    Markdown { message: String },
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    /// Render markdown into unsanitised HTML.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;

    /// Filter HTML down to the public allow-list.
    fn sanitize(&self, html: &str) -> String;

    /// Render and sanitise in one step.
    fn render_safe(&self, markdown: &str) -> Result<String, RenderError> {
        let html = self.render(markdown)?;
        Ok(self.sanitize(&html))
    }

    /// Check that markdown can be rendered. Empty content is always valid.
    fn validate(&self, markdown: &str) -> Result<(), RenderError> {
        if markdown.is_empty() {
            return Ok(());
        }
        self.render(markdown).map(|_| ())
    }

    /// Produce the safe HTML together with every derived field.
    ///
    /// `excerpt_chars == 0` disables truncation.
    fn analyze(&self, markdown: &str, excerpt_chars: usize) -> Result<Analysis, RenderError> {
        let html = self.render_safe(markdown)?;
        let plain_text = strip_markdown(markdown);
        let word_count = word_count(&plain_text);

        Ok(Analysis {
            html,
            excerpt: excerpt(markdown, excerpt_chars),
            plain_text,
            word_count,
            reading_time: reading_time(word_count),
            images: extract_images(markdown),
            headings: extract_headings(markdown),
        })
    }
}

/// Count whitespace-delimited tokens.
pub fn word_count(plain_text: &str) -> u32 {
    u32::try_from(plain_text.split_whitespace().count()).unwrap_or(u32::MAX)
}

/// Minutes needed to read `word_count` words, rounded up.
pub fn reading_time(word_count: u32) -> u32 {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

/// Size and excerpt policy applied by callers before content reaches the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    pub max_bytes: usize,
    pub excerpt_chars: usize,
}

impl ContentLimits {
    pub fn allows(&self, content: &str) -> bool {
        content.len() <= self.max_bytes
    }
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_bytes: 512 * 1024,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_is_zero_only_without_words() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
        assert_eq!(reading_time(401), 3);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\n\nthree "), 3);
    }

    #[test]
    fn content_limits_compare_bytes() {
        let limits = ContentLimits {
            max_bytes: 4,
            excerpt_chars: 10,
        };
        assert!(limits.allows("abcd"));
        assert!(!limits.allows("ábcd"));
    }

    struct FailingRenderer;

    impl RenderService for FailingRenderer {
        fn render(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::Markdown {
                message: "rewrite failed".to_string(),
            })
        }

        fn sanitize(&self, html: &str) -> String {
            html.to_string()
        }
    }

    #[test]
    fn every_render_failure_is_reported_as_markdown() {
        let expected = RenderError::Markdown {
            message: "rewrite failed".to_string(),
        };
        assert_eq!(FailingRenderer.validate("# x"), Err(expected.clone()));
        assert_eq!(FailingRenderer.analyze("# x", 0), Err(expected.clone()));
        assert_eq!(
            expected.to_string(),
            "markdown parsing failed: rewrite failed"
        );
    }

    #[test]
    fn empty_content_never_reaches_the_renderer() {
        assert_eq!(FailingRenderer.validate(""), Ok(()));
    }
}
