use anyhow::Result;
use rusqlite::Connection;

use crate::db::{self, FigureRecord, NewFigure};
use crate::extract::{extract, FieldSet};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichCounts {
    pub scanned: usize,
    pub updated: usize,
    pub fields_filled: usize,
}

#[cfg(feature = "rayon")]
fn extract_all(records: &[FigureRecord]) -> Vec<(i64, FieldSet)> {
    records
        .par_iter()
        .map(|r| (r.id, extract_record(&r.figure)))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn extract_all(records: &[FigureRecord]) -> Vec<(i64, FieldSet)> {
    records
        .iter()
        .map(|r| (r.id, extract_record(&r.figure)))
        .collect()
}

fn extract_record(f: &NewFigure) -> FieldSet {
    extract(&f.name, f.notes.as_deref().unwrap_or_default())
}

/// Number of blank columns in `f` that `fields` would fill.
fn fillable(f: &NewFigure, fields: &FieldSet) -> usize {
    // same notion of blank as db::update_extracted_fields
    let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
    [
        (f.year.is_none(), &fields.year),
        (blank(&f.manufacturer), &fields.manufacturer),
        (blank(&f.theme), &fields.theme),
        (blank(&f.size), &fields.size),
        (blank(&f.packaging), &fields.packaging),
        (blank(&f.country), &fields.country),
        (blank(&f.release_date), &fields.release_date),
    ]
    .into_iter()
    .filter(|(is_blank, value)| *is_blank && !value.is_empty())
    .count()
}

/// Re-run extraction over every stored figure and fill in blank fields.
/// Values already present (typed or previously extracted) are kept.
pub fn run(conn: &Connection) -> Result<EnrichCounts> {
    let records = db::fetch_figures(conn)?;
    let extracted = extract_all(&records);

    let mut counts = EnrichCounts {
        scanned: records.len(),
        ..Default::default()
    };

    let tx = conn.unchecked_transaction()?;
    for (record, (id, fields)) in records.iter().zip(extracted) {
        let n = fillable(&record.figure, &fields);
        if n == 0 {
            continue;
        }
        db::update_extracted_fields(&tx, id, &fields)?;
        tracing::debug!(id, filled = n, "enriched figure");
        counts.updated += 1;
        counts.fields_filled += n;
    }
    tx.commit()?;

    tracing::info!(
        scanned = counts.scanned,
        updated = counts.updated,
        fields = counts.fields_filled,
        "enrichment done"
    );
    Ok(counts)
}
