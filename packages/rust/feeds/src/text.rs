//! Plain-text helpers for feed descriptions: HTML stripping, excerpts, dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::Html;

/// Marker appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// Elements whose text content is never shown.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Extract the visible text of an HTML fragment.
///
/// Entities are decoded by the parser and runs of whitespace collapse to a
/// single space, so `<p>Hello <b>world</b></p>` becomes `Hello world`.
/// Text inside `<script>`, `<style>` and `<noscript>` is dropped.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(|a| a.value().as_element())
                .any(|el| HIDDEN_ELEMENTS.contains(&el.name()));
            (!hidden).then_some(&**text)
        })
        .collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to `max_chars` characters and append [`ELLIPSIS`] when it was longer.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Parse the date formats seen across the feeds.
///
/// rss2json emits `2024-11-06 14:30:00`; raw RSS uses RFC 2822; the events
/// API mixes RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format as `November 6, 2024`.
pub fn format_long_date(dt: &NaiveDateTime) -> String {
    dt.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn strip_html_decodes_entities_and_collapses_whitespace() {
        let html = "<div>\n  <p>Boards &amp; CEOs</p>\n\n<p>lead&nbsp;together</p></div>";
        assert_eq!(strip_html(html), "Boards & CEOs lead together");
    }

    #[test]
    fn strip_html_skips_script_and_style() {
        let html = "<style>p { color: red }</style><p>Read <b>this</b></p><script>track('x')</script>";
        assert_eq!(strip_html(html), "Read this");
    }

    #[test]
    fn strip_html_plain_text_passthrough() {
        assert_eq!(strip_html("no markup here"), "no markup here");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn truncate_long_description() {
        let text = "x".repeat(300);
        let result = truncate_excerpt(&text, 150);
        assert_eq!(result.len(), 153);
        assert!(result.starts_with(&"x".repeat(150)));
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn truncate_short_or_exact_untouched() {
        assert_eq!(truncate_excerpt("short", 150), "short");
        let exact = "y".repeat(150);
        assert_eq!(truncate_excerpt(&exact, 150), exact);
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(truncate_excerpt(&text, 4), "éééé...");
    }

    #[test]
    fn parse_rss2json_format() {
        let dt = parse_loose_date("2024-11-06 14:30:00").unwrap();
        assert_eq!((dt.month(), dt.day()), (11, 6));
        assert_eq!(format_long_date(&dt), "November 6, 2024");
    }

    #[test]
    fn parse_other_formats() {
        assert!(parse_loose_date("Wed, 06 Nov 2024 14:30:00 GMT").is_some());
        assert!(parse_loose_date("2024-11-06T14:30:00.000Z").is_some());
        assert!(parse_loose_date("2025-01-15").is_some());
        assert!(parse_loose_date("soon").is_none());
        assert!(parse_loose_date("").is_none());
    }
}
