//! Post metadata scraped out of raw HTML.
//!
//! This is a pattern-matching heuristic, not an HTML parser: elements are
//! located with lazy regexes that stop at the first closing tag, and any
//! markup inside the captured region is stripped rather than interpreted.
//! Unclosed or malformed markup simply fails to match and falls back to the
//! defaults below.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub(crate) const UNTITLED: &str = "Untitled";
pub(crate) const EXCERPT_MAX_CHARS: usize = 180;
const ELLIPSIS: char = '…';

static HTML_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.html?$").unwrap());
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
// `<p` must end the tag name so `<pre>`, `<param>` and friends are skipped
static P_AFTER_H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1[^>]*>.*?</h1>.*?<p(?:\s[^>]*)?>(.*?)</p>").unwrap()
});
static P: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostMeta {
    pub slug: String,
    /// `YYYY-MM-DD` taken from the slug prefix, or empty.
    pub date: String,
    pub title: String,
    /// Plain text, empty when the post has no paragraph.
    pub excerpt: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,
    pub html: String,
}

pub(crate) fn filename_to_slug(file_name: &str) -> String {
    HTML_EXTENSION.replace(file_name, "").into_owned()
}

pub(crate) fn date_from_slug(slug: &str) -> String {
    DATE_PREFIX
        .captures(slug)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

pub(crate) fn extract(html: &str, file_name: &str) -> PostMeta {
    let slug = filename_to_slug(file_name);
    PostMeta {
        date: date_from_slug(&slug),
        title: extract_title(html),
        excerpt: extract_excerpt(html),
        slug,
    }
}

pub(crate) fn extract_title(html: &str) -> String {
    let caps = H1.captures(html).or_else(|| TITLE.captures(html));
    match caps.map(|caps| strip_tags(&caps[1]).trim().to_string()) {
        Some(title) if !title.is_empty() => title,
        _ => UNTITLED.to_string(),
    }
}

pub(crate) fn extract_excerpt(html: &str) -> String {
    let caps = P_AFTER_H1.captures(html).or_else(|| P.captures(html));
    let Some(caps) = caps else {
        return String::new();
    };
    let text = strip_tags(&caps[1]);
    let text = WHITESPACE.replace_all(&text, " ");
    truncate(text.trim())
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text.to_string();
    }
    let mut res: String = text.chars().take(EXCERPT_MAX_CHARS - 1).collect();
    res.truncate(res.trim_end().len());
    res.push(ELLIPSIS);
    res
}

fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slug_strips_html_extension() {
        assert_eq!(filename_to_slug("2025-07-29-hello.html"), "2025-07-29-hello");
        assert_eq!(filename_to_slug("about.HTM"), "about");
        assert_eq!(filename_to_slug("Notes.HtMl"), "Notes");
        assert_eq!(filename_to_slug("page.html.bak"), "page.html.bak");
        assert_eq!(filename_to_slug("plain"), "plain");
    }

    #[test]
    fn slug_round_trip() {
        for slug in ["a", "2024-01-01-new-year", "x.y", "with space", "日本語"] {
            assert_eq!(filename_to_slug(&format!("{slug}.html")), slug);
        }
    }

    #[test]
    fn date_is_syntactic_only() {
        assert_eq!(date_from_slug("2025-07-29-launch"), "2025-07-29");
        assert_eq!(date_from_slug("9999-99-99"), "9999-99-99");
        assert_eq!(date_from_slug("launch-2025-07-29"), "");
        assert_eq!(date_from_slug("2025-7-29"), "");
    }

    #[test]
    fn title_prefers_h1() {
        let html = "<title>Doc</title><h1 class=\"x\">  Hello <em>World</em> </h1>";
        assert_eq!(extract_title(html), "Hello World");
    }

    #[test]
    fn title_falls_back_to_title_then_untitled() {
        assert_eq!(extract_title("<TITLE>\n Page \n</TITLE><p>x</p>"), "Page");
        assert_eq!(extract_title("<p>no heading</p>"), UNTITLED);
        assert_eq!(extract_title("<h1>unterminated"), UNTITLED);
        assert_eq!(extract_title("<h1><img src=x></h1>"), UNTITLED);
    }

    #[test]
    fn title_spans_lines_and_stops_at_first_close() {
        let html = "<h1>\nFirst\n</h1><h1>Second</h1>";
        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn excerpt_prefers_paragraph_after_h1() {
        let html = "<p>lead</p><h1>T</h1><div><p>  body   <b>text</b>\n here </p></div>";
        assert_eq!(extract_excerpt(html), "body text here");
    }

    #[test]
    fn excerpt_without_h1_uses_first_paragraph() {
        let html = "<section><p class=\"a\">first</p><p>second</p></section>";
        assert_eq!(extract_excerpt(html), "first");
    }

    #[test]
    fn excerpt_with_h1_but_no_later_paragraph() {
        assert_eq!(extract_excerpt("<p>before</p><h1>T</h1>"), "before");
        assert_eq!(extract_excerpt("<h1>T</h1><div>no paragraphs</div>"), "");
    }

    #[test]
    fn excerpt_skips_elements_starting_with_p() {
        assert_eq!(extract_excerpt("<h1>T</h1><pre>code</pre><p>real</p>"), "real");
        assert_eq!(
            extract_excerpt("<picture><img></picture><param name=x><p\nclass=\"a\">text</p>"),
            "text"
        );
    }

    #[test]
    fn excerpt_truncates_long_paragraph() {
        let body = "a".repeat(250);
        let excerpt = extract_excerpt(&format!("<p>{body}</p>"));
        assert_eq!(excerpt.chars().count(), EXCERPT_MAX_CHARS);
        assert!(excerpt.ends_with('…'));
        assert_eq!(&excerpt[..179], &body[..179]);
    }

    #[test]
    fn excerpt_keeps_exactly_max_length() {
        let body = "b".repeat(EXCERPT_MAX_CHARS);
        assert_eq!(extract_excerpt(&format!("<p>{body}</p>")), body);
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(200);
        let excerpt = extract_excerpt(&format!("<p>{body}</p>"));
        assert_eq!(excerpt.chars().count(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn extract_builds_full_meta() {
        let html = "<h1>Launch</h1>\n<p>We shipped.</p>";
        assert_eq!(
            extract(html, "2025-07-29-launch.html"),
            PostMeta {
                slug: "2025-07-29-launch".to_string(),
                date: "2025-07-29".to_string(),
                title: "Launch".to_string(),
                excerpt: "We shipped.".to_string(),
            }
        );
    }

    #[test]
    fn malformed_html_degrades() {
        let meta = extract("<h1 <p>>>", "broken.html");
        assert_eq!(meta.title, UNTITLED);
        assert_eq!(meta.excerpt, "");
        assert_eq!(meta.date, "");
    }
}
