use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::db::{FigureRecord, NewFigure};
use crate::error::CatalogError;
use crate::extract::{extract, FieldSet};
use crate::utils::non_empty;

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").unwrap());
static LEADING_FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+))").unwrap());

/// Seed values for a new figure: typed in by hand or taken from a listing.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub name: String,
    pub notes: String,
    pub photo_uri: String,
}

/// Editable figure form. Everything is text until it is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Draft {
    pub name: String,
    pub series: String,
    pub year: String,
    pub manufacturer: String,
    pub purchase_price: String,
    pub notes: String,
    pub photo_uri: String,
    pub description: String,
    pub theme: String,
    pub country: String,
    pub size: String,
    pub release_date: String,
    pub asst_number: String,
    pub model_number: String,
    pub packaging: String,
    pub quantity: String,
}

impl Draft {
    /// New draft with the extracted fields filled in from name + notes.
    pub fn from_prefill(prefill: Prefill) -> Self {
        let fields = extract(&prefill.name, &prefill.notes);
        let mut draft = Draft {
            name: prefill.name,
            notes: prefill.notes,
            photo_uri: prefill.photo_uri,
            ..Default::default()
        };
        draft.apply_fields(fields);
        draft
    }

    pub fn from_record(record: &FigureRecord) -> Self {
        let f = &record.figure;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Draft {
            name: f.name.clone(),
            series: text(&f.series),
            year: f.year.map(|y| y.to_string()).unwrap_or_default(),
            manufacturer: text(&f.manufacturer),
            purchase_price: f.purchase_price.map(|p| p.to_string()).unwrap_or_default(),
            notes: text(&f.notes),
            photo_uri: text(&f.photo_uri),
            description: text(&f.description),
            theme: text(&f.theme),
            country: text(&f.country),
            size: text(&f.size),
            release_date: text(&f.release_date),
            asst_number: text(&f.asst_number),
            model_number: text(&f.model_number),
            packaging: text(&f.packaging),
            quantity: f.quantity.map(|q| q.to_string()).unwrap_or_default(),
        }
    }

    /// Overwrite the extractable fields with `fields`, empty ones included.
    pub fn apply_fields(&mut self, fields: FieldSet) {
        self.year = fields.year;
        self.manufacturer = fields.manufacturer;
        self.theme = fields.theme;
        self.size = fields.size;
        self.packaging = fields.packaging;
        self.country = fields.country;
        self.release_date = fields.release_date;
    }

    /// Validate and convert to a storable figure. Numbers are read from the
    /// leading digits; unreadable or zero values are stored as NULL.
    pub fn to_new_figure(&self) -> Result<NewFigure, CatalogError> {
        let name = non_empty(&self.name).ok_or(CatalogError::MissingName)?;
        let text = |v: &str| non_empty(v).map(str::to_string);
        Ok(NewFigure {
            name: name.to_string(),
            series: text(&self.series),
            year: parse_leading_int(&self.year),
            manufacturer: text(&self.manufacturer),
            purchase_price: parse_leading_float(&self.purchase_price),
            notes: text(&self.notes),
            photo_uri: text(&self.photo_uri),
            description: text(&self.description),
            theme: text(&self.theme),
            country: text(&self.country),
            size: text(&self.size),
            release_date: text(&self.release_date),
            asst_number: text(&self.asst_number),
            model_number: text(&self.model_number),
            packaging: text(&self.packaging),
            quantity: parse_leading_int(&self.quantity),
        })
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    LEADING_INT_RE
        .captures(s)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|n| *n != 0)
}

fn parse_leading_float(s: &str) -> Option<f64> {
    LEADING_FLOAT_RE
        .captures(s)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|n| *n != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_runs_extraction() {
        let d = Draft::from_prefill(Prefill {
            name: "He-Man Masters of the Universe Origins".into(),
            notes: "Mattel. Vintage styling with modern articulation.".into(),
            photo_uri: "https://example.com/heman.jpg".into(),
        });
        assert_eq!(d.name, "He-Man Masters of the Universe Origins");
        assert_eq!(d.manufacturer, "Mattel");
        assert_eq!(d.theme, "He-Man");
        assert_eq!(d.photo_uri, "https://example.com/heman.jpg");
        assert_eq!(d.series, "");
        assert_eq!(d.quantity, "");
    }

    #[test]
    fn numbers_parse_like_form_input() {
        assert_eq!(parse_leading_int("2015"), Some(2015));
        assert_eq!(parse_leading_int(" 12abc"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("0"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_float("24.99"), Some(24.99));
        assert_eq!(parse_leading_float("$5"), None);
        assert_eq!(parse_leading_float("7.5 USD"), Some(7.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("0.00"), None);
    }

    #[test]
    fn save_requires_name() {
        let d = Draft {
            name: "   ".into(),
            ..Default::default()
        };
        assert!(matches!(d.to_new_figure(), Err(CatalogError::MissingName)));
    }

    #[test]
    fn blank_text_becomes_null() {
        let d = Draft {
            name: " Arrow ".into(),
            series: "".into(),
            year: "2015".into(),
            manufacturer: "DC Collectibles".into(),
            quantity: "2".into(),
            ..Default::default()
        };
        let f = d.to_new_figure().unwrap();
        assert_eq!(f.name, "Arrow");
        assert_eq!(f.series, None);
        assert_eq!(f.year, Some(2015));
        assert_eq!(f.manufacturer.as_deref(), Some("DC Collectibles"));
        assert_eq!(f.quantity, Some(2));
        assert_eq!(f.purchase_price, None);
    }

    #[test]
    fn record_round_trips_through_draft() {
        let figure = NewFigure {
            name: "Leonardo".into(),
            year: Some(1988),
            purchase_price: Some(12.5),
            theme: Some("Tmnt".into()),
            quantity: Some(3),
            ..Default::default()
        };
        let record = FigureRecord { id: 1, figure: figure.clone() };
        let d = Draft::from_record(&record);
        assert_eq!(d.year, "1988");
        assert_eq!(d.purchase_price, "12.5");
        assert_eq!(d.to_new_figure().unwrap(), figure);
    }
}
