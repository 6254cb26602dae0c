//! Shared utilities for command implementations
//!
//! - `load_snapshot` / `save_snapshot` - Read and write the data file
//! - `load_config` - Resolve the analytics configuration
//! - `print_json` - Pretty JSON output for `--json`

use std::path::Path;

use anyhow::{Context, Result};
use retail_core::{AnalyticsConfig, Snapshot};
use serde::Serialize;

/// Load the snapshot; a missing file is an empty store
pub fn load_snapshot(data_path: &Path) -> Result<Snapshot> {
    Snapshot::load_or_default(data_path)
        .with_context(|| format!("Failed to load snapshot: {}", data_path.display()))
}

pub fn save_snapshot(data_path: &Path, snapshot: &Snapshot) -> Result<()> {
    snapshot
        .save(data_path)
        .with_context(|| format!("Failed to save snapshot: {}", data_path.display()))
}

pub fn load_config(config_path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(config_path).context("Failed to load analytics config")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
