use std::sync::LazyLock;

use regex::Regex;

// ASCII boundaries: a year touching a non-ASCII letter ("2015年") still counts
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(?:19|20)[0-9]{2}(?-u:\b)").unwrap());

/// First standalone 19xx/20xx in the corpus.
pub fn extract(corpus: &str) -> String {
    YEAR_RE
        .find(corpus)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_year_wins() {
        assert_eq!(extract("released 1985, reissued 2015"), "1985");
        assert_eq!(extract("2015 dc collectibles"), "2015");
    }

    #[test]
    fn needs_word_boundaries() {
        assert_eq!(extract("sku 120155"), "");
        assert_eq!(extract("model 20151 then 2003"), "2003");
    }

    #[test]
    fn non_ascii_neighbors_are_boundaries() {
        assert_eq!(extract("2015年発売"), "2015");
        assert_eq!(extract("été1999"), "1999");
    }

    #[test]
    fn other_centuries_ignored() {
        assert_eq!(extract("circa 1850 or 2150"), "");
        assert_eq!(extract(""), "");
    }
}
