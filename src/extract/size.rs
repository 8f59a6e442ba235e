use std::sync::LazyLock;

use regex::Regex;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)([0-9]{1,2}(?:\.[0-9]{1,2})?)["”]?\s*(?:inch|in)?"#).unwrap()
});

/// First one-or-two digit number (optionally decimal), rendered in inches.
pub fn extract(corpus: &str) -> String {
    SIZE_RE
        .captures(corpus)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}\"", m.as_str()))
        .unwrap_or_default()
}
