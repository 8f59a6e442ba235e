use std::cmp::Ordering;

use clap::ValueEnum;

use crate::db::FigureRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Name, A to Z
    #[default]
    Name,
    /// Year, newest first
    Year,
    /// Purchase price, cheapest first
    Price,
}

/// Stable sort; missing years and prices count as 0.
pub fn sort(records: &mut [FigureRecord], order: SortOrder) {
    match order {
        SortOrder::Name => records.sort_by(|a, b| {
            a.figure
                .name
                .to_lowercase()
                .cmp(&b.figure.name.to_lowercase())
        }),
        SortOrder::Year => {
            records.sort_by_key(|r| std::cmp::Reverse(r.figure.year.unwrap_or(0)))
        }
        SortOrder::Price => records.sort_by(|a, b| {
            let pa = a.figure.purchase_price.unwrap_or(0.0);
            let pb = b.figure.purchase_price.unwrap_or(0.0);
            pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
        }),
    }
}

/// Case-insensitive substring search over name, series and manufacturer.
pub fn filter<'a>(records: &'a [FigureRecord], query: &str) -> Vec<&'a FigureRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }
    let hit = |v: Option<&str>| v.is_some_and(|s| s.to_lowercase().contains(&query));
    records
        .iter()
        .filter(|r| {
            hit(Some(&r.figure.name))
                || hit(r.figure.series.as_deref())
                || hit(r.figure.manufacturer.as_deref())
        })
        .collect()
}
