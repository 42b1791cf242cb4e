//! Check command implementation.
//!
//! Rebuilds the catalog in memory and compares it with the file on disk,
//! ignoring generation time and set order. Never writes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::assembler::{build_catalog, BuildOptions};
use crate::catalog::{diff_for_check, BaselineCounts, Difference};
use crate::fetcher::{HttpFetcher, SourceFetcher};
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::sources::SOURCES;

/// Rebuild and diff against `output`. An empty result means up to date.
pub async fn verify(
    fs: &dyn FileSystem,
    fetcher: &dyn SourceFetcher,
    output: &Path,
    now: DateTime<Utc>,
    options: BuildOptions,
) -> Result<Vec<Difference>> {
    let baseline = BaselineCounts::load(fs, output);
    let rebuilt = build_catalog(SOURCES, fetcher, &baseline, now, options)
        .await
        .context("Catalog build failed")?;

    if !fs.exists(output) {
        anyhow::bail!("check failed: {} does not exist", output.display());
    }
    let content = fs
        .read_to_string(output)
        .with_context(|| format!("check failed: cannot read {}", output.display()))?;
    let current: Value = serde_json::from_str(&content)
        .with_context(|| format!("check failed: {} is invalid JSON", output.display()))?;

    diff_for_check(&current, &rebuilt)
}

/// Run the check command
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    allow_large_delta: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let output = super::resolve_output(&config, output);
    let fetcher = HttpFetcher::new(&config.fetch)?;

    let differences = verify(
        real_fs(),
        &fetcher,
        &output,
        Utc::now(),
        BuildOptions { allow_large_delta },
    )
    .await?;

    if !differences.is_empty() {
        for difference in &differences {
            eprintln!("  {}", difference);
        }
        anyhow::bail!(
            "check failed: {} is stale; run `rangewarden update` to refresh managed ranges",
            output.display()
        );
    }

    println!("OK: {} is up to date", output.display());
    Ok(())
}
