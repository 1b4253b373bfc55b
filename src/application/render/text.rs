//! Plain-text extraction from raw markdown.
//!
//! Works line by line. Fenced code blocks are recognised before any inline
//! scanning, so backticks inside a fence can never be mistaken for inline code.
//! Each remaining line loses its block markers (blockquote, heading, list,
//! rule) and is then scanned once, span by span, for inline syntax.
//!
//! Every delimiter lookup in the inline scan is answered from tables built in
//! a single pass over the line, so the scan stays linear in the line length.

use std::collections::HashMap;

use super::outline::atx_heading;

const ELLIPSIS: &str = "...";

/// Elements whose content is never prose.
const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

/// Remove markdown syntax and normalise whitespace.
///
/// Links keep their text, images disappear entirely, inline code keeps its
/// content and fenced code blocks are dropped with their content, as are
/// `<script>` and `<style>` elements.
pub fn strip_markdown(markdown: &str) -> String {
    let mut fences = FenceState::default();
    let mut raw_block: Option<&'static str> = None;
    let mut lines = Vec::new();

    for line in source_lines(markdown) {
        if let Some(tag) = raw_block {
            if let Some(rest) = after_closing_tag(line, tag) {
                raw_block = None;
                lines.push(strip_inline(rest));
            }
            continue;
        }
        if fences.consume(line) {
            continue;
        }

        let (_, body) = split_quote_markers(line);
        if let Some(tag) = body.strip_prefix('<').and_then(raw_text_tag)
            && after_closing_tag(body, tag).is_none()
        {
            raw_block = Some(tag);
            continue;
        }

        lines.push(strip_line(line));
    }

    normalize_whitespace(&lines)
}

/// Plain text truncated to `max_chars` characters at a word boundary.
///
/// `max_chars == 0` returns the full stripped text.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    truncate_at_word(&strip_markdown(markdown), max_chars)
}

pub(crate) fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(index, _)| index);
    let window = &text[..cut];

    let kept = match window.rfind(char::is_whitespace) {
        Some(index) if index > 0 => window[..index].trim_end(),
        _ => window,
    };

    format!("{kept}{ELLIPSIS}")
}

/// Split source text into lines the way comrak numbers them: `\r\n`, `\n`
/// and a lone `\r` all end a line.
pub(crate) fn source_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(at) => {
                lines.push(&rest[..at]);
                let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[at + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Leading blockquote markers removed, with the nesting depth they encoded.
pub(crate) fn split_quote_markers(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line.trim_start();
    while let Some(quoted) = rest.strip_prefix('>') {
        depth += 1;
        rest = quoted.trim_start();
    }
    (depth, rest)
}

/// Tracks whether the scan is currently inside a fenced code block.
#[derive(Debug, Default)]
pub(crate) struct FenceState {
    open: Option<Fence>,
}

impl FenceState {
    /// Returns `true` when `line` is a fence delimiter or fenced content.
    pub(crate) fn consume(&mut self, line: &str) -> bool {
        let (depth, rest) = split_quote_markers(line);

        if let Some(fence) = self.open {
            if depth >= fence.depth {
                if fence.is_closed_by(rest) {
                    self.open = None;
                }
                return true;
            }
            // Leaving the blockquote also ends a fence opened inside it.
            self.open = None;
        }

        match Fence::opening(rest, depth) {
            Some(fence) => {
                self.open = Some(fence);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
    depth: usize,
}

impl Fence {
    fn opening(line: &str, depth: usize) -> Option<Self> {
        let rest = line.trim_start();
        let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = rest.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        // An info string containing a backtick makes this an inline code span.
        if marker == '`' && rest[len..].contains('`') {
            return None;
        }
        Some(Self { marker, len, depth })
    }

    fn is_closed_by(self, line: &str) -> bool {
        let rest = line.trim_start();
        let len = rest.chars().take_while(|c| *c == self.marker).count();
        len >= self.len && rest[len..].trim().is_empty()
    }
}

/// `script` or `style` when `after_lt` (the text following a `<`) opens one.
fn raw_text_tag(after_lt: &str) -> Option<&'static str> {
    let name_len = after_lt
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    let (name, rest) = after_lt.split_at(name_len);
    if !rest.is_empty() && !rest.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/')
    {
        return None;
    }
    RAW_TEXT_TAGS
        .into_iter()
        .find(|tag| tag.eq_ignore_ascii_case(name))
}

/// Text following `</tag ...>` on this line, if the line closes `tag`.
fn after_closing_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let start = line.to_ascii_lowercase().find(&format!("</{tag}"))?;
    let after = &line[start..];
    Some(after.find('>').map_or("", |gt| &after[gt + 1..]))
}

fn strip_line(line: &str) -> String {
    let (_, rest) = split_quote_markers(line);

    if is_rule_line(rest) {
        return String::new();
    }

    if let Some(label_end) = reference_definition(rest) {
        // Footnote definitions keep their text; link definitions vanish.
        return if rest.starts_with("[^") {
            strip_inline(&rest[label_end..])
        } else {
            String::new()
        };
    }

    if let Some((_, text)) = atx_heading(rest) {
        return strip_inline(trim_closing_hashes(text));
    }

    strip_inline(strip_list_marker(rest))
}

/// Thematic breaks (`---`, `* * *`, `___`) and setext underlines (`===`).
fn is_rule_line(line: &str) -> bool {
    let mut compact = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = compact.next() else {
        return false;
    };

    match first {
        '-' | '*' | '_' => {
            let rest: Vec<char> = compact.collect();
            rest.len() >= 2 && rest.iter().all(|c| *c == first)
        }
        '=' => line.trim().chars().all(|c| c == '='),
        _ => false,
    }
}

/// Byte offset just past `]:` when the line is a reference definition.
fn reference_definition(line: &str) -> Option<usize> {
    let label = line.strip_prefix('[')?;
    let close = label.find("]:")?;
    if close == 0 || label[..close].contains(['[', ']']) {
        return None;
    }
    Some(close + 3)
}

fn trim_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() || without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        text
    }
}

fn strip_list_marker(line: &str) -> &str {
    let after = match line.strip_prefix(['-', '*', '+']) {
        Some(after) => after,
        None => {
            let digits = line.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 || digits > 9 {
                return line;
            }
            match line[digits..].strip_prefix(['.', ')']) {
                Some(after) => after,
                None => return line,
            }
        }
    };

    if after.is_empty() {
        return after;
    }
    if !after.starts_with(char::is_whitespace) {
        return line;
    }

    strip_task_marker(after.trim_start())
}

fn strip_task_marker(item: &str) -> &str {
    for marker in ["[ ]", "[x]", "[X]"] {
        if let Some(after) = item.strip_prefix(marker)
            && (after.is_empty() || after.starts_with(char::is_whitespace))
        {
            return after.trim_start();
        }
    }
    item
}

fn strip_inline(text: &str) -> String {
    InlineScanner::new(text).strip()
}

/// A link whose text is being scanned in place.
#[derive(Debug, Clone, Copy)]
struct Region {
    start: usize,
    end: usize,
    resume: usize,
}

/// One line of inline markdown plus lookup tables for every delimiter the
/// scan may need to match.
struct InlineScanner {
    chars: Vec<char>,
    /// Matching `]` for each `[`.
    brackets: Vec<Option<usize>>,
    /// Matching `)` for each `(`.
    parens: Vec<Option<usize>>,
    /// Index of the next `>`, whitespace, `:` and `@` at or after each position.
    next_gt: Vec<usize>,
    next_space: Vec<usize>,
    next_colon: Vec<usize>,
    next_at: Vec<usize>,
    /// Start of every maximal backtick run, grouped by run length.
    tick_runs: HashMap<usize, Vec<usize>>,
    /// Start of every `</script` and `</style`, in order.
    raw_closers: HashMap<&'static str, Vec<usize>>,
}

impl InlineScanner {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();

        let mut tick_runs: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut j = 0;
        while j < chars.len() {
            if chars[j] == '`' {
                let len = run_length(&chars, j, '`', chars.len());
                tick_runs.entry(len).or_default().push(j);
                j += len;
            } else {
                j += 1;
            }
        }

        let raw_closers = RAW_TEXT_TAGS
            .into_iter()
            .map(|tag| (tag, closing_tag_positions(&chars, tag)))
            .collect();

        Self {
            brackets: pair_table(&chars, '[', ']'),
            parens: pair_table(&chars, '(', ')'),
            next_gt: next_table(&chars, |c| c == '>'),
            next_space: next_table(&chars, char::is_whitespace),
            next_colon: next_table(&chars, |c| c == ':'),
            next_at: next_table(&chars, |c| c == '@'),
            tick_runs,
            raw_closers,
            chars,
        }
    }

    fn strip(&self) -> String {
        let chars = &self.chars;
        let mut out = String::with_capacity(chars.len());
        let mut regions: Vec<Region> = Vec::new();
        let mut i = 0;

        loop {
            let (start, limit) = regions
                .last()
                .map_or((0, chars.len()), |region| (region.start, region.end));
            if i >= limit {
                match regions.pop() {
                    Some(region) => {
                        i = region.resume;
                        continue;
                    }
                    None => return out,
                }
            }

            let ch = chars[i];
            let next = (i + 1 < limit).then(|| chars[i + 1]);
            match ch {
                '\\' if next.is_some_and(|c| c.is_ascii_punctuation()) => {
                    out.push(chars[i + 1]);
                    i += 2;
                }
                '`' => {
                    let run = run_length(chars, i, '`', limit);
                    match self.code_close(i + run, run, limit) {
                        Some(close) => {
                            let code: String = chars[i + run..close].iter().collect();
                            out.push_str(code.trim());
                            i = close + run;
                        }
                        None => {
                            out.extend(std::iter::repeat_n('`', run));
                            i += run;
                        }
                    }
                }
                '!' if next == Some('[') => match self.link(i + 1, limit) {
                    Some((_, end)) => i = end,
                    None => {
                        out.push('!');
                        i += 1;
                    }
                },
                '[' => match self.link(i, limit) {
                    Some((close, end)) => {
                        regions.push(Region {
                            start: i + 1,
                            end: close,
                            resume: end,
                        });
                        i += 1;
                    }
                    None => {
                        out.push('[');
                        i += 1;
                    }
                },
                '<' => match self.angle_span(i, limit) {
                    Some(AngleSpan::Autolink { target, end }) => {
                        out.push_str(&target);
                        i = end;
                    }
                    Some(AngleSpan::Tag { end }) => i = end,
                    None => {
                        out.push('<');
                        i += 1;
                    }
                },
                '*' | '_' => {
                    let run = run_length(chars, i, ch, limit);
                    let before = (i > start).then(|| chars[i - 1]);
                    let after = (i + run < limit).then(|| chars[i + run]);
                    if is_literal_delimiter(ch, before, after) {
                        out.extend(std::iter::repeat_n(ch, run));
                    }
                    i += run;
                }
                _ => {
                    out.push(ch);
                    i += 1;
                }
            }
        }
    }

    /// First backtick run of exactly `run` ticks starting at or after `from`.
    fn code_close(&self, from: usize, run: usize, limit: usize) -> Option<usize> {
        let starts = self.tick_runs.get(&run)?;
        let index = starts.partition_point(|start| *start < from);
        starts
            .get(index)
            .copied()
            .filter(|start| start + run <= limit)
    }

    /// `[text](target)` or `[text][label]` opening at `open`, as the index of
    /// the `]` closing the text and the index just past the whole link.
    fn link(&self, open: usize, limit: usize) -> Option<(usize, usize)> {
        let close = self.brackets[open].filter(|close| *close < limit)?;
        let end = match self.chars.get(close + 1) {
            Some('(') => self.parens[close + 1],
            Some('[') => self.brackets[close + 1],
            _ => None,
        }
        .filter(|end| *end < limit)?;
        Some((close, end + 1))
    }

    fn angle_span(&self, open: usize, limit: usize) -> Option<AngleSpan> {
        let inner_start = open + 1;
        let close = self.next_gt[inner_start];
        if close >= limit || close == inner_start {
            return None;
        }

        let chars = &self.chars;
        let first = chars[inner_start];
        let unbroken = self.next_space[inner_start] >= close;

        if first.is_ascii_alphabetic() || matches!(first, '/' | '!' | '?') {
            let inner: String = chars[inner_start..close].iter().collect();
            if unbroken && is_autolink(&inner) {
                return Some(AngleSpan::Autolink {
                    target: inner,
                    end: close + 1,
                });
            }
            return Some(AngleSpan::Tag {
                end: self.tag_end(open, close, limit),
            });
        }

        // Without a leading letter only an email address can be an autolink.
        let email = unbroken
            && first != '@'
            && chars[close - 1] != '@'
            && self.next_at[inner_start] < close
            && self.next_colon[inner_start] >= close;
        email.then(|| AngleSpan::Autolink {
            target: chars[inner_start..close].iter().collect(),
            end: close + 1,
        })
    }

    /// End of a tag ending at `close`; opening `script`/`style` tags swallow
    /// everything up to their closing tag.
    fn tag_end(&self, open: usize, close: usize, limit: usize) -> usize {
        let name_end = (open + 9).min(limit);
        let name: String = self.chars[open + 1..name_end].iter().collect();
        let Some(tag) = raw_text_tag(&name) else {
            return close + 1;
        };

        let closer = self.raw_closers.get(tag).and_then(|starts| {
            let index = starts.partition_point(|start| *start <= close);
            starts.get(index).copied()
        });
        match closer {
            Some(start) if self.next_gt[start] < limit => self.next_gt[start] + 1,
            _ => close + 1,
        }
    }
}

fn run_length(chars: &[char], start: usize, ch: char, limit: usize) -> usize {
    chars[start..limit].iter().take_while(|c| **c == ch).count()
}

/// Pair each `left` with its balancing `right`, skipping escaped characters.
fn pair_table(chars: &[char], left: char, right: char) -> Vec<Option<usize>> {
    let mut table = vec![None; chars.len()];
    let mut open = Vec::new();
    let mut j = 0;

    while j < chars.len() {
        let c = chars[j];
        if c == '\\' {
            j += 2;
            continue;
        }
        if c == left {
            open.push(j);
        } else if c == right
            && let Some(start) = open.pop()
        {
            table[start] = Some(j);
        }
        j += 1;
    }

    table
}

/// For every position (and one past the end), the index of the next char
/// matching `pred`, or `chars.len()` when there is none.
fn next_table(chars: &[char], pred: impl Fn(char) -> bool) -> Vec<usize> {
    let mut table = vec![chars.len(); chars.len() + 1];
    for j in (0..chars.len()).rev() {
        table[j] = if pred(chars[j]) { j } else { table[j + 1] };
    }
    table
}

fn closing_tag_positions(chars: &[char], tag: &str) -> Vec<usize> {
    let needle: Vec<char> = format!("</{tag}").chars().collect();
    chars
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| {
            window
                .iter()
                .zip(&needle)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
        .map(|(start, _)| start)
        .collect()
}

/// Emphasis delimiters that read as plain punctuation stay in the text:
/// a lone `*` between spaces, `snake_case` underscores, `2*3`.
fn is_literal_delimiter(ch: char, before: Option<char>, after: Option<char>) -> bool {
    let spaced_before = before.is_none_or(char::is_whitespace);
    let spaced_after = after.is_none_or(char::is_whitespace);
    if spaced_before && spaced_after {
        return true;
    }

    match ch {
        '_' => {
            before.is_some_and(char::is_alphanumeric) && after.is_some_and(char::is_alphanumeric)
        }
        _ => {
            before.is_some_and(|c| c.is_ascii_digit()) && after.is_some_and(|c| c.is_ascii_digit())
        }
    }
}

enum AngleSpan {
    Autolink { target: String, end: usize },
    Tag { end: usize },
}

fn is_autolink(inner: &str) -> bool {
    match inner.split_once(':') {
        Some((scheme, rest)) => {
            scheme.len() >= 2
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
                && !rest.is_empty()
        }
        None => inner.contains('@') && !inner.starts_with('@') && !inner.ends_with('@'),
    }
}

fn normalize_whitespace(lines: &[String]) -> String {
    let mut out = String::new();
    let mut blank_pending = false;

    for line in lines {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_pending = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_pending { "\n\n" } else { "\n" });
        }
        blank_pending = false;
        out.push_str(&collapsed);
    }

    out
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn strips_headings_and_emphasis() {
        let text = strip_markdown("# Title\n\nSome **bold** and _italic_ text.");
        assert_eq!(text, "Title\n\nSome bold and italic text.");
    }

    #[test]
    fn keeps_link_text_and_drops_targets() {
        let text = strip_markdown("See [the *docs*](https://example.com/a_(b)) now.");
        assert_eq!(text, "See the docs now.");
    }

    #[test]
    fn drops_images_entirely() {
        let text = strip_markdown("A ![cat](cat.png) here and [![badge](b.svg)](https://ci)");
        assert_eq!(text, "A here and");
    }

    #[test]
    fn removes_fenced_code_with_inner_backticks() {
        let text = strip_markdown("```\ncode with `backticks`\n```");
        assert_eq!(text, "");
        assert!(!text.contains("backticks"));
    }

    #[test]
    fn fenced_code_between_paragraphs_is_dropped() {
        let text = strip_markdown("before\n\n~~~rust\nlet x = `y`;\n~~~\n\nafter");
        assert_eq!(text, "before\n\nafter");
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        assert_eq!(strip_markdown("intro\n```\nnever closed"), "intro");
    }

    #[test]
    fn inline_code_keeps_content() {
        assert_eq!(
            strip_markdown("Run `cargo build` and ``a ` b`` now"),
            "Run cargo build and a ` b now"
        );
    }

    #[test]
    fn strips_block_markers() {
        let text = strip_markdown("> quoted\n> > nested\n\n- one\n* two\n+ three\n1. four\n2) five\n- [x] done");
        assert_eq!(text, "quoted\nnested\n\none\ntwo\nthree\nfour\nfive\ndone");
    }

    #[test]
    fn removes_rules_and_setext_underlines() {
        let text = strip_markdown("Title\n=====\n\na\n\n---\n\n* * *\n\nb");
        assert_eq!(text, "Title\n\na\n\nb");
    }

    #[test]
    fn drops_reference_definitions() {
        let text = strip_markdown("Read [the guide][g].\n\n[g]: https://example.com/guide");
        assert_eq!(text, "Read the guide.");
    }

    #[test]
    fn keeps_literal_punctuation() {
        assert_eq!(strip_markdown("a * b and snake_case_name"), "a * b and snake_case_name");
        assert_eq!(strip_markdown("2*3 \\*not emphasis\\*"), "2*3 *not emphasis*");
    }

    #[test]
    fn strips_inline_html_and_keeps_autolinks() {
        assert_eq!(
            strip_markdown("Hi <span class=\"x\">there</span> <https://example.com>"),
            "Hi there https://example.com"
        );
        assert_eq!(strip_markdown("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn collapses_whitespace() {
        let text = strip_markdown("  one \t two  \n\n\n\n three  ");
        assert_eq!(text, "one two\n\nthree");
    }

    #[test]
    fn strips_closing_heading_sequence() {
        assert_eq!(strip_markdown("## Section ##"), "Section");
        assert_eq!(strip_markdown("# C#"), "C#");
    }

    #[test]
    fn excerpt_zero_returns_full_text() {
        let markdown = "# Title\n\nbody text";
        assert_eq!(excerpt(markdown, 0), strip_markdown(markdown));
    }

    #[test]
    fn excerpt_within_budget_is_unchanged() {
        assert_eq!(excerpt("short text", 10), "short text");
    }

    #[test]
    fn excerpt_backtracks_to_word_boundary() {
        assert_eq!(excerpt("one two three four", 9), "one two...");
    }

    #[test]
    fn excerpt_without_spaces_cuts_hard() {
        assert_eq!(excerpt("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let result = excerpt("ção ção ção", 5);
        assert_eq!(result, "ção...");
    }

    #[test]
    fn excerpt_respects_length_law() {
        let markdown = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";
        for budget in 1..60 {
            let result = excerpt(markdown, budget);
            let body = result.strip_suffix(ELLIPSIS).unwrap_or(&result);
            assert!(body.chars().count() <= budget, "budget {budget}: {result}");
        }
    }

    #[test]
    fn quoted_fences_are_dropped_with_their_content() {
        assert_eq!(strip_markdown("> ```\n> code `x`\n> ```"), "");
        assert_eq!(
            strip_markdown("> intro\n>\n> ~~~\n> let x = 1;\n> ~~~\n\nafter"),
            "intro\n\nafter"
        );
    }

    #[test]
    fn leaving_the_quote_closes_its_fence() {
        assert_eq!(strip_markdown("> ```\n> code\nafter"), "after");
    }

    #[test]
    fn unquoted_fence_keeps_quote_like_lines_inside() {
        assert_eq!(strip_markdown("```\n> prompt\n```\ndone"), "done");
    }

    #[test]
    fn splits_lines_like_comrak() {
        assert_eq!(source_lines("a\r\nb\rc\nd\n"), vec!["a", "b", "c", "d"]);
        assert_eq!(source_lines("\n\nx"), vec!["", "", "x"]);
        assert!(source_lines("").is_empty());
    }

    #[test]
    fn lone_carriage_returns_end_lines() {
        assert_eq!(strip_markdown("# A\r```\rhidden\r```\rshown"), "A\nshown");
    }

    #[test]
    fn drops_script_and_style_content() {
        assert_eq!(strip_markdown("<script>alert(1)</script>Hello"), "Hello");
        assert_eq!(strip_markdown("a <SCRIPT src=x></SCRIPT> ok"), "a ok");
        assert_eq!(
            strip_markdown("<style>\nbody { color: red }\n</style>\nafter"),
            "after"
        );
        assert_eq!(strip_markdown("<scripts>kept</scripts>"), "kept");
    }

    #[test]
    fn unmatched_delimiters_scan_in_linear_time() {
        let started = Instant::now();
        for unit in ["[", "<a", "[x](", "`", "< ", "(", "<1"] {
            let line = unit.repeat(100_000);
            let text = strip_markdown(&line);
            assert!(text.chars().count() <= line.chars().count(), "{unit}");
        }
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn unmatched_delimiters_stay_literal() {
        for unit in ["[", "<a", "[x](", "(", "<1"] {
            let line = unit.repeat(1_000);
            assert_eq!(strip_markdown(&line), line, "{unit}");
        }
    }

    #[test]
    fn deeply_nested_links_keep_their_text() {
        let depth = 50_000;
        let markdown = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));
        assert_eq!(strip_markdown(&markdown), "x");
    }

    #[test]
    fn spans_inside_link_text_stop_at_the_bracket() {
        assert_eq!(strip_markdown("[a `b](u) c`"), "a `b c`");
        assert_eq!(strip_markdown("[x *y](u) z*"), "x y z");
    }
}
