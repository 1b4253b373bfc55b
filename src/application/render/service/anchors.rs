//! Heading ids and link targets applied to the formatted HTML.
//!
//! Comrak runs with `sourcepos` enabled, so every block element carries the
//! source line it started on. Heading ids are derived from that raw line, which
//! keeps them identical to the ids in the extracted outline.

use std::collections::HashMap;

use comrak::nodes::{AstNode, NodeValue};
use lol_html::{RewriteStrSettings, element, rewrite_str};

use crate::application::render::outline::atx_heading;
use crate::application::render::text::source_lines;
use crate::application::render::types::RenderError;
use crate::domain::slug::anchor_id;

/// Heading anchor ids keyed by the 1-based source line of the heading.
pub(super) type HeadingAnchors = HashMap<usize, String>;

pub(super) fn collect_heading_anchors<'a>(root: &'a AstNode<'a>, source: &str) -> HeadingAnchors {
    let lines = source_lines(source);
    let mut anchors = HeadingAnchors::new();

    for node in root.descendants() {
        let data = node.data.borrow();
        if !matches!(data.value, NodeValue::Heading(_)) {
            continue;
        }

        let start = data.sourcepos.start;
        let raw = lines
            .get(start.line.saturating_sub(1))
            .copied()
            .map(|line| line.get(start.column.saturating_sub(1)..).unwrap_or(line));

        let id = match raw.and_then(atx_heading) {
            Some((_, text)) => anchor_id(text),
            None => anchor_id(&collect_inline_text(node)),
        };

        if !id.is_empty() {
            anchors.insert(start.line, id);
        }
    }

    anchors
}

/// Strip `data-sourcepos`, set heading ids and open external links in a new tab.
pub(super) fn decorate_html(html: &str, anchors: &HeadingAnchors) -> Result<String, RenderError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("[data-sourcepos]", |el| {
                    let Some(position) = el.get_attribute("data-sourcepos") else {
                        return Ok(());
                    };
                    el.remove_attribute("data-sourcepos");

                    if !is_heading_tag(&el.tag_name()) {
                        return Ok(());
                    }
                    if let Some(id) = start_line(&position).and_then(|line| anchors.get(&line)) {
                        el.set_attribute("id", id)?;
                    }
                    Ok(())
                }),
                element!("a[href]", |el| {
                    let external = el
                        .get_attribute("href")
                        .is_some_and(|href| !is_relative_link(&href));
                    if external {
                        el.set_attribute("target", "_blank")?;
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })
}

fn is_heading_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Parse the start line out of `"3:1-3:14"`.
fn start_line(position: &str) -> Option<usize> {
    position.split(':').next()?.trim().parse().ok()
}

fn is_relative_link(href: &str) -> bool {
    href.starts_with('#')
        || (href.starts_with('/') && !href.starts_with("//"))
        || href.starts_with("./")
        || href.starts_with("../")
}

fn collect_inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants().skip(1) {
        match &descendant.data.borrow().value {
            NodeValue::Text(literal) => text.push_str(literal),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::LineBreak | NodeValue::SoftBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
