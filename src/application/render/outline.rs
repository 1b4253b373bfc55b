//! Heading outline and image manifest, read straight from the markdown source.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{FenceState, source_lines};
use super::types::Heading;
use crate::domain::slug::anchor_id;

static IMAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("image pattern is valid"));

/// Image targets in document order. Duplicates are kept.
pub fn extract_images(markdown: &str) -> Vec<String> {
    IMAGE_PATTERN
        .captures_iter(markdown)
        .filter_map(|captures| captures.get(1))
        .map(|target| image_target(target.as_str()).to_string())
        .collect()
}

/// ATX headings outside fenced code, in document order.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut fences = FenceState::default();
    let mut headings = Vec::new();

    for line in source_lines(markdown) {
        if fences.consume(line) {
            continue;
        }
        let Some((level, text)) = atx_heading(line) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        headings.push(Heading {
            level,
            text: text.to_string(),
            id: anchor_id(text),
        });
    }

    headings
}

/// Parse an ATX heading line into its level and trimmed text.
///
/// Accepts up to three leading spaces and one to six `#` followed by
/// whitespace or the end of the line.
pub(crate) fn atx_heading(line: &str) -> Option<(u8, &str)> {
    let indent = line.bytes().take_while(|b| *b == b' ').count();
    if indent > 3 {
        return None;
    }

    let rest = &line[indent..];
    let hashes = rest.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }

    Some((hashes as u8, after.trim()))
}

fn image_target(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('<')
        && let Some(end) = inner.find('>')
    {
        return &inner[..end];
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((url, title)) if is_link_title(title.trim()) => url,
        _ => trimmed,
    }
}

fn is_link_title(candidate: &str) -> bool {
    candidate.len() >= 2
        && ((candidate.starts_with('"') && candidate.ends_with('"'))
            || (candidate.starts_with('\'') && candidate.ends_with('\'')))
}
