use regex::Regex;

/// Levenshtein edit distance over chars. Insert, delete and substitute each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0; a.len() + 1];
    for (i, cb) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ca) in a.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[a.len()]
}

/// Case-insensitive whole-word pattern for a literal needle. Word edges are
/// ASCII, so "bandai製" still contains the word "bandai".
pub fn word_pattern(needle: &str) -> Regex {
    let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(needle));
    Regex::new(&pattern).unwrap()
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Uppercase the first char of every word run ("he-man" -> "He-Man").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        let word = is_word_char(c);
        if word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = word;
    }
    out
}

/// Uppercase only the first char ("usa" -> "Usa").
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("hasbro", ""), 6);
        assert_eq!(levenshtein("", "neca"), 4);
        assert_eq!(levenshtein("hasbro", "hasbro"), 0);
        assert_eq!(levenshtein("hasbro", "hasbr0"), 1);
        assert_eq!(levenshtein("mattel", "matel"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("neca", "new"), 2);
    }

    #[test]
    fn levenshtein_has_no_transposition() {
        assert_eq!(levenshtein("funko", "fnuko"), 2);
    }

    #[test]
    fn word_matching() {
        assert!(word_pattern("DC Collectibles").is_match("dc collectibles, loose"));
        assert!(word_pattern("Hasbro").is_match("by hasbro."));
        assert!(!word_pattern("Hasbro").is_match("hasbros"));
        assert!(word_pattern("Super7").is_match("super7 ultimates"));
    }

    #[test]
    fn word_edges_are_ascii() {
        assert!(word_pattern("Bandai").is_match("bandai製 s.h.figuarts"));
        assert!(word_pattern("NECA").is_match("éneca"));
        assert!(!word_pattern("NECA").is_match("zneca"));
        assert!(!is_word_char('é'));
    }

    #[test]
    fn casing_helpers() {
        assert_eq!(title_case("he-man"), "He-Man");
        assert_eq!(title_case("lord of the rings"), "Lord Of The Rings");
        assert_eq!(title_case("tmnt"), "Tmnt");
        assert_eq!(capitalize_first("usa"), "Usa");
        assert_eq!(capitalize_first(""), "");
    }
}
