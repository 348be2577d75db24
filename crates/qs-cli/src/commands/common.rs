//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use qs_core::Config;
use qs_sql::Extractor;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load configuration: `--config` when given, else `queryshape.yml` in the
/// working directory when present, else defaults.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => load_config_from_dir(Path::new(".")),
    }
}

pub(crate) fn load_config_from_dir(dir: &Path) -> Result<Config> {
    let has_config = ["queryshape.yml", "queryshape.yaml"]
        .iter()
        .any(|name| dir.join(name).exists());
    if !has_config {
        return Ok(Config::default());
    }
    Config::load_from_dir(dir)
        .with_context(|| format!("Failed to load config from {}", dir.display()))
}

/// Build the engine from config, applying the `--dialect` override
pub(crate) fn build_extractor(global: &GlobalArgs) -> Result<Extractor> {
    let config = load_config(global)?;
    let mut extractor = Extractor::from_config(&config).context("Invalid configuration")?;
    if let Some(dialect) = &global.dialect {
        extractor = extractor
            .with_dialect(dialect)
            .context("Invalid SQL dialect")?;
    }

    if global.verbose {
        eprintln!(
            "[verbose] Using {} dialect, unhandled syntax policy {:?}",
            extractor.dialect_name(),
            extractor.policy()
        );
    }
    Ok(extractor)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
