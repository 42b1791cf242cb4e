//! Error types for RangeWarden.
//!
//! Every variant of [`CatalogError`] is fatal for a catalog build. The only
//! non-fatal condition (an unreadable previous catalog) never surfaces as an
//! error; see [`crate::catalog::BaselineCounts`].

use thiserror::Error;

/// Failure to obtain a JSON object from an upstream source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Source must use https: {url}")]
    DisallowedScheme { url: String },

    #[error("Source host is not allowlisted: {host}")]
    DisallowedHost { host: String },

    #[error("Network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response from {url} too large: {size} bytes (max: {max} bytes)")]
    TooLarge { url: String, size: usize, max: usize },

    #[error("Invalid JSON from {url}: {reason}")]
    InvalidJson { url: String, reason: String },

    #[error("Expected top-level object from {url}")]
    NotAnObject { url: String },
}

/// Payload does not match the shape declared for its source.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{url} missing '{field}' array")]
    MissingArray { url: String, field: String },

    #[error("{url} {path} must be an object")]
    NotAnObject { url: String, path: String },

    #[error("{url} {path} must include exactly one of 'ipv4Prefix' or 'ipv6Prefix' as a string")]
    InvalidPrefixEntry { url: String, path: String },

    #[error("{url} {path} must be a string")]
    NotAString { url: String, path: String },

    #[error("Source {set_id} uses json_array_key but declares no payload key")]
    MissingPayloadKey { set_id: String },
}

/// A single CIDR entry or the resulting set failed validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CidrError {
    #[error("CIDR entry is empty")]
    Empty,

    #[error("Invalid CIDR '{0}'")]
    Invalid(String),

    #[error("CIDR '{0}' has host bits set")]
    HostBitsSet(String),

    #[error("CIDR '{value}' too broad (min /{min} for IPv{version})")]
    TooBroad { value: String, version: u8, min: u8 },

    #[error("produced an empty CIDR list")]
    EmptySet,

    #[error("produced {count} CIDRs (max {max})")]
    TooMany { count: usize, max: usize },
}

/// A set grew beyond the anti-poisoning thresholds.
#[derive(Error, Debug, PartialEq, Eq)]
#[error(
    "{set_id} growth guard tripped: baseline={baseline}, new={new}, \
     rerun with --allow-large-delta after manual source verification"
)]
pub struct GrowthGuardError {
    pub set_id: String,
    pub baseline: usize,
    pub new: usize,
}

/// Any failure that aborts a catalog build.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Transport error for {set_id}: {source}")]
    Transport {
        set_id: String,
        #[source]
        source: FetchError,
    },

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("CIDR error in {set_id}: {source}")]
    Cidr {
        set_id: String,
        #[source]
        source: CidrError,
    },

    #[error("Growth guard violation: {0}")]
    Growth(#[from] GrowthGuardError),

    #[error("Invalid source registry: {0}")]
    Registry(String),
}
