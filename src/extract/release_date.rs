use std::sync::LazyLock;

use regex::Regex;

static MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(20[0-9]{2})")
        .unwrap()
});
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(0?[1-9]|1[0-2])[/\-](20[0-9]{2})(?-u:\b)").unwrap()
});

/// Month-name dates come back as "<abbr> <year>" ("mar 2021"); numeric
/// month/year dates come back exactly as written ("03/2021").
pub fn extract(corpus: &str) -> String {
    if let Some(caps) = MONTH_YEAR_RE.captures(corpus) {
        return format!("{} {}", &caps[1], &caps[2]);
    }
    NUMERIC_RE
        .find(corpus)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
