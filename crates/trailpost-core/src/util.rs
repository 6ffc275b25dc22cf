//! Shared utility functions used across multiple modules.

use std::sync::OnceLock;

use regex::Regex;

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Cut `value` to `max_chars` characters, appending `...` when anything was dropped.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Remove HTML tags, leaving only text content.
pub fn strip_html(value: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
    tag.replace_all(value, "").into_owned()
}

/// Percent-encode a single path segment.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost:3001"));
        assert!(is_http_url("https://forum.example.com"));
        assert!(!is_http_url("ftp://example.com"));
    }

    #[test]
    fn truncate_chars_only_marks_real_truncation() {
        assert_eq!(truncate_chars("Kyoto", 20), "Kyoto");
        assert_eq!(
            truncate_chars("Three weeks across Patagonia by bus", 20),
            "Three weeks across P..."
        );
        assert_eq!(truncate_chars("京都の秋を歩く旅", 4), "京都の秋...");
    }

    #[test]
    fn strip_html_drops_tags() {
        assert_eq!(
            strip_html("<h1>Day 1</h1><p>Arrived in <b>Hanoi</b></p>"),
            "Day 1Arrived in Hanoi"
        );
    }

    #[test]
    fn path_segment_encodes_reserved_characters() {
        assert_eq!(path_segment("abc 123/x"), "abc%20123%2Fx");
    }
}
