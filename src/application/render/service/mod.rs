mod anchors;
mod config;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};

use crate::application::render::types::{RenderError, RenderService};

use anchors::{collect_heading_anchors, decorate_html};
use config::{build_sanitizer, default_options};

/// Default Comrak-based rendering pipeline with Ammonia sanitisation.
///
/// Holds only immutable configuration, so one instance is built at startup and
/// shared behind an `Arc`.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakRenderService {
    /// Construct a renderer with the GFM extensions posts rely on.
    pub fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_sanitizer(),
        }
    }
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderService for ComrakRenderService {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.is_empty() {
            return Ok(String::new());
        }

        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        let anchors = collect_heading_anchors(root, markdown);

        let rendered_html = render_html_stage(root, &self.options)?;
        decorate_html(&rendered_html, &anchors)
    }

    fn sanitize(&self, html: &str) -> String {
        self.sanitizer.clean(html).to_string()
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::outline::extract_headings;

    fn service() -> ComrakRenderService {
        ComrakRenderService::new()
    }

    #[test]
    fn empty_input_renders_nothing() {
        let service = service();
        assert_eq!(service.render("").expect("render"), "");
        assert_eq!(service.render_safe("").expect("render"), "");
    }

    #[test]
    fn renders_core_blocks() {
        let html = service()
            .render_safe("## Intro\n\n*a* **b** ~~c~~\n\n> quote\n\n1. one\n\n---\n\n| a | b |\n|---|---|\n| 1 | 2 |\n")
            .expect("render");

        assert!(html.contains("<h2 id=\"intro\">Intro</h2>"));
        assert!(html.contains("<em>a</em>"));
        assert!(html.contains("<strong>b</strong>"));
        assert!(html.contains("<del>c</del>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<hr"));
        assert!(html.contains("<table>"));
        assert!(!html.contains("data-sourcepos"));
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let html = service()
            .render_safe("```rust\nfn main() {}\n```\n")
            .expect("render");
        assert!(html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn strips_script_and_keeps_text() {
        let html = service()
            .render_safe("<script>alert(1)</script>Hello")
            .expect("render");
        assert!(!html.contains("<script"));
        assert!(html.contains("Hello"));
    }

    #[test]
    fn strips_event_handlers_and_javascript_links() {
        let html = service()
            .render_safe("<img src=\"x.png\" onerror=\"alert(1)\">\n\n[x](javascript:alert(1))")
            .expect("render");
        assert!(!html.contains("onerror"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let html = service()
            .render_safe("[site](https://example.com) and [local](/about)")
            .expect("render");
        let (external, local) = html.split_once("/about").expect("local link present");
        assert!(external.contains("target=\"_blank\""));
        assert!(external.contains("rel=\"noopener noreferrer\""));
        assert!(!local.contains("target="));
    }

    #[test]
    fn sanitize_is_idempotent_on_rendered_output() {
        let service = service();
        let markdown = "# Title\n\n[link](https://x.example) ![img](https://x.example/a.png)\n\n- [x] done\n\n```go\nfmt.Println(1)\n```\n\n<div onclick=\"x()\">raw</div>";
        let once = service.render_safe(markdown).expect("render");
        assert_eq!(service.sanitize(&once), once);
    }

    #[test]
    fn heading_ids_match_extracted_outline() {
        let markdown = "# Go Tips\n\nText\n\n## What's `new`? ##\n\n### Notes\n\n### Notes\n";
        let html = service().render_safe(markdown).expect("render");

        for heading in extract_headings(markdown) {
            assert!(
                html.contains(&format!("id=\"{}\"", heading.id)),
                "missing anchor {} in {html}",
                heading.id
            );
        }
    }

    #[test]
    fn setext_headings_use_rendered_text() {
        let html = service().render_safe("Big Title\n=========\n").expect("render");
        assert!(html.contains("<h1 id=\"big-title\">Big Title</h1>"));
    }

    #[test]
    fn validate_accepts_malformed_markdown() {
        let service = service();
        assert!(service.validate("").is_ok());
        assert!(service.validate("**unclosed [link](").is_ok());
    }

    #[test]
    fn lone_carriage_returns_keep_heading_ids_aligned() {
        let html = service().render_safe("x\r# A\n# B").expect("render");
        assert!(html.contains("<h1 id=\"a\">A</h1>"), "{html}");
        assert!(html.contains("<h1 id=\"b\">B</h1>"), "{html}");
    }

    #[test]
    fn analysis_text_excludes_script_content() {
        let analysis = service()
            .analyze("<script>alert(1)</script>Hello\n\n<style>\np { color: red }\n</style>\n\nWorld", 0)
            .expect("analyze");
        assert_eq!(analysis.plain_text, "Hello\n\nWorld");
        assert_eq!(analysis.word_count, 2);
    }
}
