//! Configuration management for RangeWarden.
//!
//! Only operational knobs live here. Anti-poisoning thresholds and the source
//! host allowlist are compiled-in constants and cannot be relaxed by a config
//! file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rangewarden/config.yaml";

/// Default catalog output location
pub const DEFAULT_OUTPUT_PATH: &str = "config/managed_ip_ranges.json";

/// Upper bound accepted for `fetch.max_payload_bytes` (64 MB)
const MAX_PAYLOAD_LIMIT: usize = 64 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog artifact path (also the baseline source)
    pub output: PathBuf,

    /// HTTP fetch settings
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum accepted response body size
    pub max_payload_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_payload_bytes: 4 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            anyhow::bail!("output path cannot be empty");
        }

        if self.fetch.timeout_secs == 0 {
            anyhow::bail!("fetch.timeout_secs must be > 0");
        }

        if self.fetch.max_payload_bytes == 0 || self.fetch.max_payload_bytes > MAX_PAYLOAD_LIMIT {
            anyhow::bail!(
                "fetch.max_payload_bytes must be between 1 and {} (got {})",
                MAX_PAYLOAD_LIMIT,
                self.fetch.max_payload_bytes
            );
        }

        Ok(())
    }
}
