//! Per-source schema extraction.
//!
//! Turns an untrusted [`RawPayload`] into a flat list of raw CIDR strings.
//! Nothing is dropped or coerced: any entry that does not have the declared
//! shape fails the whole source with a [`SchemaError`] naming the URL and path.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::SchemaError;
use crate::fetcher::RawPayload;
use crate::sources::{ParserKind, SourceSpec};

const OPENAI_PREFIXES_FIELD: &str = "prefixes";
const OPENAI_IPV4_FIELD: &str = "ipv4Prefix";
const OPENAI_IPV6_FIELD: &str = "ipv6Prefix";
const OPENAI_TIMESTAMP_FIELD: &str = "creationTime";

/// Source-declared timestamp, normalized to UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTimestamp {
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub iso: String,
    pub unix: i64,
}

impl SourceTimestamp {
    fn from_utc(dt: DateTime<Utc>) -> Self {
        Self {
            iso: dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            unix: dt.timestamp(),
        }
    }
}

/// Output of schema extraction for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// CIDR strings in payload order, not yet validated
    pub raw_cidrs: Vec<String>,
    pub source_timestamp: Option<SourceTimestamp>,
}

/// Extract raw CIDRs (and timestamp, if the parser kind has one) from a payload.
pub fn extract(payload: &RawPayload, source: &SourceSpec) -> Result<Extracted, SchemaError> {
    match source.parser {
        ParserKind::OpenAiPrefixes => parse_openai_prefixes(payload, source.source_url),
        ParserKind::JsonArrayKey { key } => {
            if key.trim().is_empty() {
                return Err(SchemaError::MissingPayloadKey {
                    set_id: source.set_id.to_string(),
                });
            }
            parse_json_array_key(payload, source.source_url, key)
        }
    }
}

/// `{"creationTime": "...", "prefixes": [{"ipv4Prefix": "..."} | {"ipv6Prefix": "..."}]}`
pub fn parse_openai_prefixes(payload: &RawPayload, url: &str) -> Result<Extracted, SchemaError> {
    let prefixes = payload
        .get(OPENAI_PREFIXES_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::MissingArray {
            url: url.to_string(),
            field: OPENAI_PREFIXES_FIELD.to_string(),
        })?;

    let mut raw_cidrs = Vec::with_capacity(prefixes.len());
    for (index, entry) in prefixes.iter().enumerate() {
        let path = format!("{}[{}]", OPENAI_PREFIXES_FIELD, index);
        let entry = entry.as_object().ok_or_else(|| SchemaError::NotAnObject {
            url: url.to_string(),
            path: path.clone(),
        })?;

        let cidr = match (entry.get(OPENAI_IPV4_FIELD), entry.get(OPENAI_IPV6_FIELD)) {
            (Some(Value::String(v4)), None) => v4,
            (None, Some(Value::String(v6))) => v6,
            _ => {
                return Err(SchemaError::InvalidPrefixEntry {
                    url: url.to_string(),
                    path,
                })
            }
        };
        raw_cidrs.push(cidr.clone());
    }

    let source_timestamp = payload
        .get(OPENAI_TIMESTAMP_FIELD)
        .and_then(Value::as_str)
        .and_then(normalize_timestamp);

    Ok(Extracted {
        raw_cidrs,
        source_timestamp,
    })
}

/// `{"<key>": ["cidr", ...]}`. Produces no timestamp.
pub fn parse_json_array_key(
    payload: &RawPayload,
    url: &str,
    key: &str,
) -> Result<Extracted, SchemaError> {
    let values = payload
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::MissingArray {
            url: url.to_string(),
            field: key.to_string(),
        })?;

    let raw_cidrs = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::NotAString {
                    url: url.to_string(),
                    path: format!("{}[{}]", key, index),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Extracted {
        raw_cidrs,
        source_timestamp: None,
    })
}

/// Normalize an ISO-8601 timestamp to UTC.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and bare dates.
/// Anything unparseable is `None`, never an error.
///
/// # Examples
/// ```
/// use rangewarden::extract::normalize_timestamp;
/// let ts = normalize_timestamp("2025-01-02T03:04:05+01:00").unwrap();
/// assert_eq!(ts.iso, "2025-01-02T02:04:05Z");
/// assert!(normalize_timestamp("yesterday").is_none());
/// ```
pub fn normalize_timestamp(raw: &str) -> Option<SourceTimestamp> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(SourceTimestamp::from_utc(dt.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(SourceTimestamp::from_utc(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| SourceTimestamp::from_utc(naive.and_utc()))
}
