use quire::application::render::{
    ComrakRenderService, RenderService, excerpt, extract_headings, extract_images, reading_time,
    strip_markdown, word_count,
};

const FIXTURE: &str = r#"# Release Notes

Some **bold** text, a [link](https://example.com) and `inline code`.

## Setup Guide

```rust
// ## not a heading
fn main() {}
```

![screenshot](/img/setup.png "Setup")

- [x] done
- [ ] pending

| a | b |
|---|---|
| 1 | 2 |
"#;

#[test]
fn empty_input_renders_nothing() {
    let renderer = ComrakRenderService::new();
    assert_eq!(renderer.render("").expect("render"), "");
    assert_eq!(renderer.render_safe("").expect("render"), "");
}

#[test]
fn sanitizing_is_idempotent() {
    let renderer = ComrakRenderService::new();
    let once = renderer.render_safe(FIXTURE).expect("render");
    assert_eq!(renderer.sanitize(&once), once);
}

#[test]
fn headings_outline_matches_rendered_ids() {
    let headings = extract_headings(FIXTURE);
    insta::assert_json_snapshot!(headings, @r###"
    [
      {
        "level": 1,
        "text": "Release Notes",
        "id": "release-notes"
      },
      {
        "level": 2,
        "text": "Setup Guide",
        "id": "setup-guide"
      }
    ]
    "###);

    let html = ComrakRenderService::new()
        .render_safe(FIXTURE)
        .expect("render");
    for heading in &headings {
        assert!(
            html.contains(&format!(r#"id="{}""#, heading.id)),
            "missing id {} in {html}",
            heading.id
        );
    }
}

#[test]
fn images_are_listed_in_order() {
    assert_eq!(
        extract_images("![a](u1) text ![b](u2)"),
        vec!["u1".to_string(), "u2".to_string()]
    );
    assert_eq!(extract_images(FIXTURE), vec!["/img/setup.png".to_string()]);
}

#[test]
fn fenced_code_never_reaches_plain_text() {
    let text = strip_markdown(FIXTURE);
    assert!(!text.contains("fn main"));
    assert!(!text.contains("```"));
    assert!(text.contains("Release Notes"));
    assert!(text.contains("inline code"));
    assert!(!text.contains("screenshot"));
}

#[test]
fn reading_time_follows_word_count() {
    assert_eq!(reading_time(0), 0);
    assert_eq!(reading_time(1), 1);
    assert_eq!(reading_time(200), 1);
    assert_eq!(reading_time(401), 3);

    let text = strip_markdown(FIXTURE);
    let words = word_count(&text);
    assert!(words > 0);
    assert_eq!(reading_time(words), 1);
}

#[test]
fn excerpt_stays_within_budget() {
    let full = strip_markdown(FIXTURE);
    assert_eq!(excerpt(FIXTURE, 0), full);

    let short = excerpt(FIXTURE, 20);
    let body = short.strip_suffix("...").expect("truncated");
    assert!(body.chars().count() <= 20);
    assert!(full.starts_with(body));
}

#[test]
fn scripts_never_survive() {
    let html = ComrakRenderService::new()
        .render_safe("<script>alert(1)</script>Hello")
        .expect("render");
    assert!(!html.contains("<script"));
    assert!(html.contains("Hello"));
}
