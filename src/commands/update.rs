//! Update command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::assembler::{build_catalog, BuildOptions};
use crate::catalog::{BaselineCounts, Catalog};
use crate::fetcher::{HttpFetcher, SourceFetcher};
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::lock::LockGuard;
use crate::sources::SOURCES;

/// Build the catalog against the baseline at `output` and write it there.
///
/// Nothing is written unless every source validates.
pub async fn refresh(
    fs: &dyn FileSystem,
    fetcher: &dyn SourceFetcher,
    output: &Path,
    now: DateTime<Utc>,
    options: BuildOptions,
) -> Result<Catalog> {
    let baseline = BaselineCounts::load(fs, output);
    info!("Baseline: {} sets from {:?}", baseline.len(), output);

    let catalog = build_catalog(SOURCES, fetcher, &baseline, now, options)
        .await
        .context("Catalog build failed; nothing written")?;

    catalog.write(fs, output)?;
    Ok(catalog)
}

/// Run the update command
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    allow_large_delta: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let output = super::resolve_output(&config, output);

    let _lock = LockGuard::acquire(&output)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;

    let catalog = refresh(
        real_fs(),
        &fetcher,
        &output,
        Utc::now(),
        BuildOptions { allow_large_delta },
    )
    .await?;

    println!("Wrote managed IP range catalog: {}", output.display());
    for set in &catalog.sets {
        println!(
            "- {}: {} CIDRs (version={})",
            set.id,
            set.cidrs.len(),
            set.version
        );
    }

    Ok(())
}
