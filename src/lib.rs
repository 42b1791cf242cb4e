//! # RangeWarden - Trusted Crawler IP Range Catalog
//!
//! Maintains a catalog of CIDR blocks attributed to named crawler/agent
//! identities, sourced from a small set of allowlisted machine-readable
//! endpoints. Loosely-structured upstream JSON goes in; a strictly validated,
//! canonical, versioned artifact comes out, which downstream allowlist logic
//! can trust without re-validating.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RangeWarden                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: update, check, sources, version            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Sources (static registry) + Config (serde_yaml)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── https + host allowlist, size limit, no retries       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Extract ─▶ Cidr (ipnet) ─▶ Guard ─▶ Version (sha2)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Assembler ─▶ Catalog (serde_json, atomic write, fs2 lock)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use rangewarden::assembler::{build_catalog, BuildOptions};
//! use rangewarden::catalog::BaselineCounts;
//! use rangewarden::config::Config;
//! use rangewarden::fetcher::HttpFetcher;
//! use rangewarden::fs_abstraction::real_fs;
//! use rangewarden::sources::SOURCES;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let fetcher = HttpFetcher::new(&config.fetch)?;
//!     let baseline = BaselineCounts::load(real_fs(), &config.output);
//!
//!     let catalog = build_catalog(
//!         SOURCES,
//!         &fetcher,
//!         &baseline,
//!         Utc::now(),
//!         BuildOptions::default(),
//!     )
//!     .await?;
//!     catalog.write(real_fs(), &config.output)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! - **HTTPS Only** - Non-`https` URLs and non-allowlisted hosts are rejected before any request
//! - **Strict Schemas** - Malformed entries fail the source, never silently dropped
//! - **Strict CIDRs** - Host bits must be zero; IPv4 < /8 and IPv6 < /24 are rejected
//! - **Bounded Sets** - At most 4096 entries per set, and never an empty set
//! - **Growth Guard** - Large jumps versus the previous catalog need an explicit override
//! - **All-or-Nothing** - Any failure aborts the build before anything is written
//!
//! ## Modules
//!
//! - [`assembler`] - Per-source pipeline and catalog assembly
//! - [`catalog`] - Catalog model, baseline loading, equivalence check
//! - [`cidr`] - Strict CIDR parsing and canonical sets
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error taxonomy
//! - [`extract`] - Per-source schema extraction
//! - [`fetcher`] - HTTPS client for upstream sources
//! - [`fs_abstraction`] - Filesystem trait for testability
//! - [`guard`] - Anti-poisoning growth guard
//! - [`lock`] - File locking against concurrent writers
//! - [`sources`] - Trusted source registry
//! - [`version`] - Content-addressed set versions

pub mod assembler;
pub mod catalog;
pub mod cidr;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod fs_abstraction;
pub mod guard;
pub mod lock;
pub mod sources;
pub mod version;

pub use catalog::{Catalog, CatalogEntry};
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::CatalogError;
