use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = "data/figures.sqlite";

/// Runtime settings. Every key can be set from the environment with the
/// `FIGURES_` prefix, e.g. `FIGURES_DB_PATH=/tmp/figures.sqlite`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)?
            .add_source(Environment::with_prefix("FIGURES"))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load settings")
    }
}
