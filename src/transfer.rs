use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::Value;

use crate::db::{self, FigureRecord, NewFigure};
use crate::error::CatalogError;

pub fn to_json(records: &[FigureRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write every figure to `path` as a JSON array. Returns the record count.
pub fn export_json(conn: &Connection, path: &Path) -> Result<usize> {
    let records = db::fetch_figures(conn)?;
    let json = to_json(&records)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!(count = records.len(), path = ?path, "exported figures");
    Ok(records.len())
}

/// Parse an exported JSON array. Ids are dropped so the store assigns new ones.
pub fn parse_import(json: &str) -> Result<Vec<NewFigure>> {
    let value: Value = serde_json::from_str(json).context("Import is not valid JSON")?;
    let Value::Array(items) = value else {
        return Err(CatalogError::InvalidImport("expected a JSON array".into()).into());
    };

    let mut figures = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let has_name = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| !n.trim().is_empty());
        if !has_name {
            return Err(CatalogError::InvalidImport(format!("record {} has no name", idx)).into());
        }
        let figure: NewFigure = serde_json::from_value(item)
            .map_err(|e| CatalogError::InvalidImport(format!("record {}: {}", idx, e)))?;
        figures.push(figure);
    }
    Ok(figures)
}

/// Read `path` and add every record in one transaction.
pub fn import_json(conn: &Connection, path: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let figures = parse_import(&raw)?;
    let n = db::bulk_insert_figures(conn, &figures)?;
    tracing::info!(count = n, path = ?path, "imported figures");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_copies_records() {
        let src = db::connect_in_memory().unwrap();
        db::insert_figure(
            &src,
            &NewFigure {
                name: "Spider-Man".into(),
                manufacturer: Some("Hasbro".into()),
                purchase_price: Some(24.99),
                ..Default::default()
            },
        )
        .unwrap();
        let json = to_json(&db::fetch_figures(&src).unwrap()).unwrap();
        assert!(json.contains("\"purchase_price\": 24.99"));

        let dst = db::connect_in_memory().unwrap();
        db::insert_figure(&dst, &NewFigure { name: "Existing".into(), ..Default::default() })
            .unwrap();
        let figures = parse_import(&json).unwrap();
        assert_eq!(db::bulk_insert_figures(&dst, &figures).unwrap(), 1);

        let all = db::fetch_figures(&dst).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].figure.name, "Spider-Man");
        assert_eq!(all[1].figure.manufacturer.as_deref(), Some("Hasbro"));
    }

    #[test]
    fn import_accepts_missing_columns() {
        let figures = parse_import(r#"[{"name": "Arrow", "year": 2015}, {"id": 9, "name": "Flash"}]"#)
            .unwrap();
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].year, Some(2015));
        assert_eq!(figures[1].name, "Flash");
    }

    #[test]
    fn import_rejects_bad_input() {
        for bad in [r#"{"name": "x"}"#, r#"[{"year": 2015}]"#, r#"[{"name": "  "}]"#, "not json"] {
            assert!(parse_import(bad).is_err(), "accepted {}", bad);
        }
        let err = parse_import(r#"[{"name": "ok"}, {"notes": "x"}]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidImport(msg)) if msg.contains("record 1")
        ));
    }
}
