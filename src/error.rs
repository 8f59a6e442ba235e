use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no figure with id {0}")]
    NotFound(i64),
    #[error("figure name is required")]
    MissingName,
    #[error("invalid import: {0}")]
    InvalidImport(String),
}
