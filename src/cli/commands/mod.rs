//! CLI command handlers for `KtuAnalytics`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod report;
pub mod summary;

use ktu_analytics::config::Config;
use ktu_analytics::core::models::Curriculum;
use ktu_analytics::{error, info};
use std::fs;
use std::path::Path;

/// Curriculum tables for this run: `--curriculum` wins over config
fn load_curriculum(override_path: Option<&Path>, config: &Config) -> Result<Curriculum, String> {
    let result = match override_path {
        Some(path) => Curriculum::from_file(path),
        None => config.curriculum(),
    };
    result.map_err(|e| {
        error!("Curriculum load failed: {e}");
        format!("✗ Failed to load curriculum tables: {e}")
    })
}

/// Read an input document, refusing files over the configured size cap
fn read_input(input_file: &Path, max_bytes: usize) -> Result<Vec<u8>, String> {
    let size = fs::metadata(input_file)
        .map_err(|e| format!("✗ Cannot read {}: {e}", input_file.display()))?
        .len();
    if usize::try_from(size).map_or(true, |s| s > max_bytes) {
        return Err(format!(
            "✗ {} is {size} bytes, larger than the {max_bytes} byte limit",
            input_file.display()
        ));
    }

    let bytes = fs::read(input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", input_file.display()))?;
    info!("Read {} ({} bytes)", input_file.display(), bytes.len());
    Ok(bytes)
}
