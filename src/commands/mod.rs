//! CLI command implementations.

pub mod check;
pub mod sources;
pub mod update;

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Resolve the catalog path: CLI override first, then config.
pub(crate) fn resolve_output(config: &Config, override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| config.output.clone())
}

/// Load config from `path`, falling back to defaults when absent.
pub(crate) fn load_config(path: &Path) -> anyhow::Result<Config> {
    use anyhow::Context;
    Config::load_or_default(path).with_context(|| format!("Failed to load config from {:?}", path))
}
