use crate::utils::is_word_char;

/// Keyword groups in priority order; the first group with a hit wins.
pub const PACKAGING_RULES: &[(&[&str], &str)] = &[
    (&["on card", "carded"], "On Card"),
    (&["box"], "Box"),
    (&["bagged", "bag"], "Bag"),
    (&["loose"], "Loose"),
];

// Only "no box", "not carded" style phrasing with a single space; "no-box"
// and "no. box" still count as the keyword.
const NEGATIONS: &[&str] = &["no ", "not ", "without "];

pub fn extract(corpus: &str) -> String {
    PACKAGING_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| has_affirmed(corpus, k)))
        .map(|(_, label)| label.to_string())
        .unwrap_or_default()
}

/// True if `keyword` occurs at least once without a negation word directly
/// in front of it ("no box", "without bag").
fn has_affirmed(corpus: &str, keyword: &str) -> bool {
    corpus
        .match_indices(keyword)
        .any(|(idx, _)| !is_negated(&corpus[..idx]))
}

fn is_negated(before: &str) -> bool {
    NEGATIONS.iter().any(|neg| {
        before
            .strip_suffix(neg)
            .map(|rest| !rest.chars().next_back().is_some_and(is_word_char))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ignores_position() {
        assert_eq!(extract("bagged in a box"), "Box");
        assert_eq!(extract("loose, carded later"), "On Card");
        assert_eq!(extract("loose in a bag"), "Bag");
    }

    #[test]
    fn each_group() {
        assert_eq!(extract("still on card"), "On Card");
        assert_eq!(extract("mint in box"), "Box");
        assert_eq!(extract("polybagged exclusive"), "Bag");
        assert_eq!(extract("loose complete"), "Loose");
        assert_eq!(extract("complete"), "");
    }

    #[test]
    fn negated_keywords_are_skipped() {
        assert_eq!(extract("loose, no box, 2015"), "Loose");
        assert_eq!(extract("without box, bagged"), "Bag");
        assert_eq!(extract("not carded, loose"), "Loose");
        assert_eq!(extract("no box but boxed set"), "Box");
    }

    #[test]
    fn negation_needs_its_own_word() {
        // "casino" ends in "no" but is not a negation
        assert_eq!(extract("casino box"), "Box");
    }
}
