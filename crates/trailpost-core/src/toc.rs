//! Table of contents for rich-text post bodies.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::util::strip_html;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 1 to 3
    pub level: u8,
    pub text: String,
    /// Anchor id injected into the heading
    pub anchor: String,
}

/// Headings found in a post plus the body with anchors injected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    pub entries: Vec<TocEntry>,
    pub html: String,
}

impl TableOfContents {
    /// Collects `h1`-`h3` headings in document order and gives the n-th one
    /// `id="heading-{n}"`, replacing any id it already had.
    pub fn build(html: &str) -> Self {
        static HEADING: OnceLock<Regex> = OnceLock::new();
        static ID_ATTR: OnceLock<Regex> = OnceLock::new();
        let heading = HEADING.get_or_init(|| {
            Regex::new(r"(?is)<h([1-3])(\s[^>]*)?>(.*?)</h[1-3]\s*>").expect("valid heading regex")
        });
        let id_attr = ID_ATTR.get_or_init(|| {
            Regex::new(r#"(?i)\s+id\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid id regex")
        });

        let mut entries = Vec::new();
        let html = heading
            .replace_all(html, |caps: &Captures<'_>| {
                let level = caps[1].parse::<u8>().unwrap_or(1);
                let attrs = caps
                    .get(2)
                    .map(|attrs| id_attr.replace_all(attrs.as_str(), "").into_owned())
                    .unwrap_or_default();
                let inner = &caps[3];
                let anchor = format!("heading-{}", entries.len());
                entries.push(TocEntry {
                    level,
                    text: collapse_whitespace(&strip_html(inner)),
                    anchor: anchor.clone(),
                });
                format!("<h{level} id=\"{anchor}\"{attrs}>{inner}</h{level}>")
            })
            .into_owned();

        Self { entries, html }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
