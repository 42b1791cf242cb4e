//! Catalog assembly.
//!
//! ```text
//! SourceSpec ─▶ fetch ─▶ extract ─▶ canonicalize ─▶ growth guard ─▶ version ─▶ CatalogEntry
//! ```
//!
//! Sources are processed one at a time in registry order. The first failure
//! aborts the build; no partial catalog is ever returned. The clock and the
//! baseline are inputs, so a build is a pure function of
//! (registry, payloads, baseline, now).

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::catalog::{BaselineCounts, Catalog, CatalogEntry};
use crate::cidr::canonicalize;
use crate::error::CatalogError;
use crate::extract::extract;
use crate::fetcher::{RawPayload, SourceFetcher};
use crate::guard::enforce_growth_guard;
use crate::sources::{validate_registry, SourceSpec};
use crate::version::version_for_set;

/// Per-build switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Accept growth beyond the anti-poisoning thresholds
    pub allow_large_delta: bool,
}

/// Validate one fetched payload into a catalog entry.
pub fn build_entry(
    source: &SourceSpec,
    payload: &RawPayload,
    baseline: &BaselineCounts,
    date: &str,
    options: BuildOptions,
) -> Result<CatalogEntry, CatalogError> {
    let extracted = extract(payload, source)?;
    debug!(
        "{}: extracted {} raw entries",
        source.set_id,
        extracted.raw_cidrs.len()
    );

    let set = canonicalize(&extracted.raw_cidrs).map_err(|e| CatalogError::Cidr {
        set_id: source.set_id.to_string(),
        source: e,
    })?;

    enforce_growth_guard(
        source.set_id,
        baseline.get(source.set_id),
        set.len(),
        options.allow_large_delta,
    )?;

    let cidrs = set.to_strings();
    let (source_timestamp, source_timestamp_unix) = match extracted.source_timestamp {
        Some(ts) => (Some(ts.iso), Some(ts.unix)),
        None => (None, None),
    };
    let version = version_for_set(date, &cidrs, source_timestamp.as_deref());

    Ok(CatalogEntry {
        id: source.set_id.to_string(),
        label: source.label.to_string(),
        provider: source.provider.to_string(),
        source_url: source.source_url.to_string(),
        source_timestamp,
        source_timestamp_unix,
        cidrs,
        version,
    })
}

/// Fetch and validate every source, producing a complete catalog or the
/// first error.
pub async fn build_catalog(
    sources: &[SourceSpec],
    fetcher: &dyn SourceFetcher,
    baseline: &BaselineCounts,
    now: DateTime<Utc>,
    options: BuildOptions,
) -> Result<Catalog, CatalogError> {
    validate_registry(sources)?;

    let date = now.format("%Y-%m-%d").to_string();
    let mut sets = Vec::with_capacity(sources.len());

    for source in sources {
        info!("Fetching {} from {}...", source.set_id, source.source_url);
        let payload = fetcher
            .fetch_json(source.source_url)
            .await
            .map_err(|e| CatalogError::Transport {
                set_id: source.set_id.to_string(),
                source: e,
            })?;

        let entry = build_entry(source, &payload, baseline, &date, options)?;
        info!(
            "Validated {} - {} CIDRs (version={})",
            entry.id,
            entry.cidrs.len(),
            entry.version
        );
        sets.push(entry);
    }

    Ok(Catalog {
        catalog_version: date,
        generated_at: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        generated_at_unix: now.timestamp(),
        sets,
    })
}
