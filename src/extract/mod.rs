pub mod country;
pub mod manufacturer;
pub mod packaging;
pub mod release_date;
pub mod size;
pub mod theme;
pub mod year;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Word characters are ASCII only; any other char separates tokens.
static TOKEN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").unwrap());

/// Catalog fields inferred from a title and free-text notes.
///
/// Every field is either empty (no evidence) or a value in its own format:
/// a 4-digit year, a size like `5.5"`, a catalog label, or a release date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    pub year: String,
    pub manufacturer: String,
    pub theme: String,
    pub size: String,
    pub packaging: String,
    pub country: String,
    pub release_date: String,
}

impl FieldSet {
    pub fn is_empty(&self) -> bool {
        *self == FieldSet::default()
    }
}

/// Lowercased title + notes, the only text every rule matches against.
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
    tokens: Vec<String>,
}

impl Corpus {
    pub fn new(title: &str, notes: &str) -> Self {
        let text = format!("{} {}", title, notes).to_lowercase();
        let tokens = TOKEN_SPLIT_RE
            .split(&text)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Corpus { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Run every field rule over `title` and `notes`. Never fails; a field with
/// no match is left empty.
pub fn extract(title: &str, notes: &str) -> FieldSet {
    let corpus = Corpus::new(title, notes);
    let text = corpus.text();

    let fields = FieldSet {
        year: year::extract(text),
        manufacturer: manufacturer::extract(text, corpus.tokens()),
        theme: theme::extract(text),
        size: size::extract(text),
        packaging: packaging::extract(text),
        country: country::extract(text),
        release_date: release_date::extract(text),
    };
    tracing::trace!(?fields, tokens = corpus.tokens().len(), "extracted fields");
    fields
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_joins_and_lowercases() {
        let c = Corpus::new("Marvel Legends", "HASBRO");
        assert_eq!(c.text(), "marvel legends hasbro");
        assert_eq!(c.tokens(), ["marvel", "legends", "hasbro"]);
    }

    #[test]
    fn corpus_drops_empty_tokens() {
        let c = Corpus::new("", "");
        assert_eq!(c.text(), " ");
        assert!(c.tokens().is_empty());

        let c = Corpus::new("Spider-Man!", "  (loose)  ");
        assert_eq!(c.tokens(), ["spider", "man", "loose"]);
    }

    #[test]
    fn non_ascii_splits_tokens() {
        let c = Corpus::new("Bandai製 S.H.Figuarts", "hasbr0年");
        assert_eq!(c.tokens(), ["bandai", "s", "h", "figuarts", "hasbr0"]);
    }

    #[test]
    fn spider_man_listing() {
        let f = extract(
            "Marvel Legends Spider-Man",
            "Hasbro. Includes web accessories.",
        );
        assert_eq!(f.manufacturer, "Hasbro");
        assert_eq!(f.theme, "Marvel");
        assert_eq!(f.year, "");
        assert_eq!(f.size, "");
        assert_eq!(f.packaging, "");
        assert_eq!(f.country, "");
        assert_eq!(f.release_date, "");
    }

    #[test]
    fn arrow_listing() {
        let f = extract("Arrow Season 3 Figure", "DC Collectibles, loose, no box, 2015");
        assert_eq!(f.year, "2015");
        assert_eq!(f.manufacturer, "DC Collectibles");
        assert_eq!(f.packaging, "Loose");
        assert_eq!(f.theme, "Dc");
        assert_eq!(f.size, "3\"");
    }

    #[test]
    fn he_man_listing() {
        let f = extract("He-Man Origins", "Mattel made in China, 5.5 inch");
        assert_eq!(f.manufacturer, "Mattel");
        assert_eq!(f.country, "China");
        assert_eq!(f.size, "5.5\"");
        assert_eq!(f.theme, "He-Man");
    }

    #[test]
    fn empty_input_yields_empty_fields() {
        let f = extract("", "");
        assert!(f.is_empty());
        assert_eq!(f, FieldSet::default());
    }

    #[test]
    fn repeated_calls_agree() {
        let a = extract("Star Wars Black Series 6 inch", "Hasbr0 carded, Mar 2021");
        let b = extract("Star Wars Black Series 6 inch", "Hasbr0 carded, Mar 2021");
        assert_eq!(a, b);
        assert_eq!(a.manufacturer, "Hasbro");
        assert_eq!(a.packaging, "On Card");
        assert_eq!(a.release_date, "mar 2021");
        assert_eq!(a.theme, "Star Wars");
        assert_eq!(a.size, "6\"");
    }
}
