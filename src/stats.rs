use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::db::FigureRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub total_price: f64,
    pub avg_price: f64,
    pub most_common_maker: String,
    pub most_common_series: String,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
}

pub fn compute(records: &[FigureRecord]) -> CollectionStats {
    if records.is_empty() {
        return CollectionStats::default();
    }

    let total = records.len();
    let total_price: f64 = records
        .iter()
        .map(|r| r.figure.purchase_price.unwrap_or(0.0))
        .sum();

    let (min_year, max_year) = match records.iter().filter_map(|r| r.figure.year).minmax() {
        MinMaxResult::NoElements => (None, None),
        MinMaxResult::OneElement(y) => (Some(y), Some(y)),
        MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
    };

    CollectionStats {
        total,
        total_price,
        avg_price: total_price / total as f64,
        most_common_maker: most_common(records.iter().map(|r| r.figure.manufacturer.as_deref())),
        most_common_series: most_common(records.iter().map(|r| r.figure.series.as_deref())),
        min_year,
        max_year,
    }
}

/// Most frequent non-empty value; ties go to the value seen first.
fn most_common<'a>(values: impl Iterator<Item = Option<&'a str>>) -> String {
    let values: Vec<&str> = values.flatten().filter(|v| !v.is_empty()).collect();
    let counts = values.iter().copied().counts();
    let mut best: Option<(&str, usize)> = None;
    for &v in values.iter().unique() {
        let n = counts[v];
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((v, n));
        }
    }
    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}
