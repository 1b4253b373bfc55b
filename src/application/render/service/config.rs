use std::{borrow::Cow, collections::HashSet};

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Allow-list applied to every rendered post body.
pub(crate) fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_tags(HEADING_TAGS);
    builder.add_tags([
        "pre",
        "code",
        "blockquote",
        "table",
        "thead",
        "tbody",
        "tr",
        "th",
        "td",
        "dl",
        "dt",
        "dd",
        "hr",
        "figure",
        "figcaption",
        "del",
        "input",
    ]);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("code", &["class"]);
    builder.add_tag_attributes("pre", &["class"]);
    builder.add_tag_attributes("th", &["align"]);
    builder.add_tag_attributes("td", &["align"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    for tag in HEADING_TAGS {
        builder.add_tag_attributes(tag, &["id"]);
    }

    builder.url_schemes(HashSet::from(["http", "https", "mailto", "tel"]));
    builder.link_rel(Some("noopener noreferrer"));

    builder.attribute_filter(|element, attribute, value| {
        if attribute_allowed(element, attribute, value) {
            Some(Cow::Borrowed(value))
        } else {
            None
        }
    });

    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;

    let render = &mut options.render;
    render.github_pre_lang = false;
    render.r#unsafe = true;
    // Heading anchors are resolved against source lines after rendering.
    render.sourcepos = true;
}

/// Value-level rules that ammonia's attribute lists cannot express.
fn attribute_allowed(element: &str, attribute: &str, value: &str) -> bool {
    match (element, attribute) {
        ("code", "class") => is_language_class(value),
        ("pre", "class") => value == "highlight",
        ("a", "target") => value == "_blank",
        ("input", "type") => value == "checkbox",
        _ => true,
    }
}

fn is_language_class(value: &str) -> bool {
    value
        .strip_prefix("language-")
        .is_some_and(|lang| !lang.is_empty() && lang.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        build_sanitizer().clean(html).to_string()
    }

    #[test]
    fn keeps_language_classes_only() {
        let html = clean("<pre><code class=\"language-rust\">fn main() {}</code></pre>");
        assert!(html.contains("class=\"language-rust\""));

        let html = clean("<code class=\"language-c++\">x</code><code class=\"evil\">y</code>");
        assert!(!html.contains("class="));
    }

    #[test]
    fn pre_class_must_be_highlight() {
        assert!(clean("<pre class=\"highlight\">x</pre>").contains("class=\"highlight\""));
        assert!(!clean("<pre class=\"other\">x</pre>").contains("class="));
    }

    #[test]
    fn ids_survive_only_on_headings() {
        let html = clean("<h2 id=\"intro\">Intro</h2><p id=\"para\">Body</p>");
        assert!(html.contains("<h2 id=\"intro\">"));
        assert!(!html.contains("id=\"para\""));
    }

    #[test]
    fn link_targets_must_be_blank() {
        let html = clean("<a href=\"https://a.example\" target=\"_blank\">a</a>");
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));

        let html = clean("<a href=\"https://a.example\" target=\"_top\">a</a>");
        assert!(!html.contains("target="));
    }

    #[test]
    fn rejects_unsafe_schemes_and_handlers() {
        let html = clean(
            "<a href=\"javascript:alert(1)\">x</a><img src=\"ftp://host/a.png\" onerror=\"alert(1)\">",
        );
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("ftp:"));
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn keeps_relative_and_mail_links() {
        let html = clean("<a href=\"/posts/a\">a</a><a href=\"mailto:me@example.com\">m</a>");
        assert!(html.contains("href=\"/posts/a\""));
        assert!(html.contains("href=\"mailto:me@example.com\""));
    }

    #[test]
    fn removes_script_and_iframe_content() {
        let html = clean("<script>alert(1)</script><iframe src=\"https://x\"></iframe><p>ok</p>");
        assert_eq!(html, "<p>ok</p>");
    }

    #[test]
    fn keeps_task_list_checkboxes() {
        let html = clean("<input type=\"checkbox\" checked=\"\" disabled=\"\" /><input type=\"text\">");
        assert!(html.contains("type=\"checkbox\""));
        assert!(!html.contains("type=\"text\""));
    }
}
