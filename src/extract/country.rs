use crate::utils::capitalize_first;

pub const COUNTRIES: &[&str] = &[
    "usa", "japan", "china", "germany", "mexico", "canada", "uk", "italy", "korea",
];

/// First country named as "made in <country>" or "<country> edition".
pub fn extract(corpus: &str) -> String {
    COUNTRIES
        .iter()
        .find(|c| {
            corpus.contains(&format!("made in {}", c)) || corpus.contains(&format!("{} edition", c))
        })
        .map(|c| capitalize_first(c))
        .unwrap_or_default()
}
