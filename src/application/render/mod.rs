//! Markdown pipeline: rendering, sanitisation and derived metadata.
//!
//! Every function here is pure. The same markdown always yields the same HTML,
//! plain text, outline and image list, and nothing is logged or cached; callers
//! own both concerns.

mod outline;
mod service;
mod text;
mod types;

pub use outline::{extract_headings, extract_images};
pub use service::ComrakRenderService;
pub use text::{excerpt, strip_markdown};
pub use types::{
    Analysis, ContentLimits, DEFAULT_EXCERPT_CHARS, Heading, RenderError, RenderService,
    WORDS_PER_MINUTE, reading_time, word_count,
};
