use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{levenshtein, word_pattern};

/// Known manufacturers, in priority order.
pub const BRANDS: &[&str] = &[
    "DC Collectibles",
    "Hasbro",
    "Mattel",
    "Kenner",
    "NECA",
    "Mcfarlane",
    "Bandai",
    "Jakks",
    "Funko",
    "Super7",
    "Diamond Select",
    "Hot Toys",
    "Sideshow",
    "Kotobukiya",
    "Playmates",
    "Revoltech",
    "Figma",
];

/// Largest edit distance still accepted as a typo of a brand.
pub const MAX_DISTANCE: usize = 2;

struct Brand {
    label: &'static str,
    lowered: String,
    pattern: Regex,
}

static CATALOG: LazyLock<Vec<Brand>> = LazyLock::new(|| {
    BRANDS
        .iter()
        .map(|&label| Brand {
            label,
            lowered: label.to_lowercase(),
            pattern: word_pattern(label),
        })
        .collect()
});

/// Resolve the manufacturer from the corpus and its tokens.
///
/// Brands are visited in catalog order. A whole-word hit returns that brand
/// immediately. Otherwise every token is scored against the brand, and the
/// strictly closest (brand, token) pair within [`MAX_DISTANCE`] across the
/// whole catalog is kept; ties stay with the earlier pair.
pub fn extract(corpus: &str, tokens: &[String]) -> String {
    let mut selected = "";
    let mut best = usize::MAX;

    for brand in CATALOG.iter() {
        if brand.pattern.is_match(corpus) {
            tracing::trace!(brand = brand.label, "exact brand hit");
            return brand.label.to_string();
        }

        for token in tokens {
            let dist = levenshtein(&brand.lowered, token);
            if dist <= MAX_DISTANCE && dist < best {
                selected = brand.label;
                best = dist;
            }
        }
    }

    if !selected.is_empty() {
        tracing::trace!(brand = selected, distance = best, "fuzzy brand hit");
    }
    selected.to_string()
}
