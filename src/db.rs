use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::extract::FieldSet;
use crate::utils::non_empty;

const COLUMNS: &str = "id, name, series, year, manufacturer, purchase_price, notes, photo_uri, \
     description, theme, country, size, release_date, asst_number, model_number, packaging, quantity";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS figures (
        id             INTEGER PRIMARY KEY NOT NULL,
        name           TEXT NOT NULL,
        series         TEXT,
        year           INTEGER,
        manufacturer   TEXT,
        purchase_price REAL,
        notes          TEXT,
        photo_uri      TEXT,
        description    TEXT,
        theme          TEXT,
        country        TEXT,
        size           TEXT,
        release_date   TEXT,
        asst_number    TEXT,
        model_number   TEXT,
        packaging      TEXT,
        quantity       INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_figures_name ON figures(name);
";

/// A figure as written to the store (no id yet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFigure {
    pub name: String,
    pub series: Option<String>,
    pub year: Option<i64>,
    pub manufacturer: Option<String>,
    pub purchase_price: Option<f64>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub country: Option<String>,
    pub size: Option<String>,
    pub release_date: Option<String>,
    pub asst_number: Option<String>,
    pub model_number: Option<String>,
    pub packaging: Option<String>,
    pub quantity: Option<i64>,
}

/// A stored figure. Serializes flat, with the column names as keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureRecord {
    pub id: i64,
    #[serde(flatten)]
    pub figure: NewFigure,
}

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn connect_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Drop every figure and recreate an empty table.
pub fn reset_database(conn: &Connection) -> Result<()> {
    conn.execute_batch("DROP TABLE IF EXISTS figures;")?;
    init_schema(conn)?;
    tracing::warn!("figures table reset");
    Ok(())
}

// ── Writes ──

const INSERT_SQL: &str = "INSERT INTO figures (
        name, series, year, manufacturer, purchase_price, notes, photo_uri,
        description, theme, country, size, release_date, asst_number, model_number, packaging, quantity
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";

pub fn insert_figure(conn: &Connection, f: &NewFigure) -> Result<i64> {
    conn.execute(INSERT_SQL, &figure_params(f)[..])?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, name = %f.name, "inserted figure");
    Ok(id)
}

pub fn update_figure(conn: &Connection, id: i64, f: &NewFigure) -> Result<()> {
    let changed = conn.execute(
        "UPDATE figures SET
            name = ?1, series = ?2, year = ?3, manufacturer = ?4, purchase_price = ?5, notes = ?6,
            photo_uri = ?7, description = ?8, theme = ?9, country = ?10, size = ?11,
            release_date = ?12, asst_number = ?13, model_number = ?14, packaging = ?15, quantity = ?16
         WHERE id = ?17",
        params![
            f.name,
            f.series,
            f.year,
            f.manufacturer,
            f.purchase_price,
            f.notes,
            f.photo_uri,
            f.description,
            f.theme,
            f.country,
            f.size,
            f.release_date,
            f.asst_number,
            f.model_number,
            f.packaging,
            f.quantity,
            id
        ],
    )?;
    if changed == 0 {
        return Err(CatalogError::NotFound(id).into());
    }
    tracing::debug!(id, "updated figure");
    Ok(())
}

/// Returns false if there was no such figure.
pub fn delete_figure(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM figures WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Insert all figures in one transaction; nothing is kept if any insert fails.
pub fn bulk_insert_figures(conn: &Connection, figures: &[NewFigure]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(INSERT_SQL)?;
        for f in figures {
            count += stmt.execute(&figure_params(f)[..])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Fill blank (NULL, empty or whitespace-only) extracted columns from
/// `fields`; columns that already hold a value are left alone. Returns false
/// if there was no such figure.
pub fn update_extracted_fields(conn: &Connection, id: i64, fields: &FieldSet) -> Result<bool> {
    let year: Option<i64> = fields.year.parse().ok();
    let sets = EXTRACTED_TEXT_COLUMNS
        .iter()
        .zip(2..)
        .map(|(col, idx)| fill_blank(col, idx))
        .collect::<Vec<_>>()
        .join(",\n            ");
    let n = conn.execute(
        &format!(
            "UPDATE figures SET
            year = COALESCE(year, ?1),
            {}
         WHERE id = ?8",
            sets
        ),
        params![
            year,
            non_empty(&fields.manufacturer),
            non_empty(&fields.theme),
            non_empty(&fields.size),
            non_empty(&fields.packaging),
            non_empty(&fields.country),
            non_empty(&fields.release_date),
            id
        ],
    )?;
    Ok(n > 0)
}

const EXTRACTED_TEXT_COLUMNS: [&str; 6] =
    ["manufacturer", "theme", "size", "packaging", "country", "release_date"];

/// `col = ?idx` when `col` is blank, keeping the stored text untouched otherwise.
fn fill_blank(col: &str, idx: usize) -> String {
    format!(
        "{col} = CASE WHEN TRIM(IFNULL({col}, ''), ' ' || char(9, 10, 11, 12, 13)) = '' \
         THEN IFNULL(?{idx}, {col}) ELSE {col} END"
    )
}

// ── Reads ──

pub fn fetch_figures(conn: &Connection) -> Result<Vec<FigureRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM figures ORDER BY id", COLUMNS))?;
    let rows = stmt
        .query_map([], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_figure_by_id(conn: &Connection, id: i64) -> Result<Option<FigureRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM figures WHERE id = ?1", COLUMNS))?;
    let mut rows = stmt.query_map([id], row_to_record)?;
    Ok(rows.next().transpose()?)
}

pub fn count_figures(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM figures", [], |row| row.get(0))?)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FigureRecord> {
    Ok(FigureRecord {
        id: row.get(0)?,
        figure: NewFigure {
            name: row.get(1)?,
            series: row.get(2)?,
            year: row.get(3)?,
            manufacturer: row.get(4)?,
            purchase_price: row.get(5)?,
            notes: row.get(6)?,
            photo_uri: row.get(7)?,
            description: row.get(8)?,
            theme: row.get(9)?,
            country: row.get(10)?,
            size: row.get(11)?,
            release_date: row.get(12)?,
            asst_number: row.get(13)?,
            model_number: row.get(14)?,
            packaging: row.get(15)?,
            quantity: row.get(16)?,
        },
    })
}

fn figure_params(f: &NewFigure) -> [&dyn ToSql; 16] {
    [
        &f.name,
        &f.series,
        &f.year,
        &f.manufacturer,
        &f.purchase_price,
        &f.notes,
        &f.photo_uri,
        &f.description,
        &f.theme,
        &f.country,
        &f.size,
        &f.release_date,
        &f.asst_number,
        &f.model_number,
        &f.packaging,
        &f.quantity,
    ]
}
