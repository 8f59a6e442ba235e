pub mod collection;
pub mod config;
pub mod db;
pub mod draft;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod listing;
pub mod stats;
pub mod transfer;
pub mod utils;

pub use error::CatalogError;
pub use extract::{extract, FieldSet};
