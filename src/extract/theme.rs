use crate::utils::title_case;

/// Franchise keywords, checked in order as plain substrings.
pub const THEMES: &[&str] = &[
    "star wars",
    "marvel",
    "dc",
    "he-man",
    "gi joe",
    "transformers",
    "tmnt",
    "lord of the rings",
    "spawn",
    "fortnite",
];

pub fn extract(corpus: &str) -> String {
    THEMES
        .iter()
        .find(|theme| corpus.contains(*theme))
        .map(|theme| title_case(theme))
        .unwrap_or_default()
}
