//! Catalog document model, persistence and equivalence checking.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use crate::fs_abstraction::FileSystem;

/// One source's published result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub provider: String,
    pub source_url: String,
    pub source_timestamp: Option<String>,
    pub source_timestamp_unix: Option<i64>,
    pub cidrs: Vec<String>,
    pub version: String,
}

/// The whole persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Build date, `YYYY-MM-DD`
    pub catalog_version: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub generated_at: String,
    pub generated_at_unix: i64,
    pub sets: Vec<CatalogEntry>,
}

impl Catalog {
    /// Pretty JSON with a trailing newline, as written to disk.
    pub fn render(&self) -> Result<String> {
        let mut rendered =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog")?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Write the catalog atomically, creating parent directories.
    pub fn write(&self, fs: &dyn FileSystem, path: &Path) -> Result<()> {
        let rendered = self.render()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !fs.exists(parent) {
                fs.create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        fs.write_atomic(path, rendered.as_bytes())
            .with_context(|| format!("Failed to write catalog to {:?}", path))
    }
}

/// Per-set CIDR counts from the previously persisted catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineCounts(HashMap<String, usize>);

impl BaselineCounts {
    pub fn get(&self, set_id: &str) -> Option<usize> {
        self.0.get(set_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extract counts from a parsed document.
    ///
    /// Lenient: entries that are not objects, or lack a string `id` or an
    /// array `cidrs`, are skipped. A document without a `sets` array yields
    /// no baseline.
    pub fn from_value(value: &Value) -> Self {
        let Some(sets) = value.get("sets").and_then(Value::as_array) else {
            return Self::default();
        };

        let counts = sets
            .iter()
            .filter_map(|item| {
                let id = item.get("id")?.as_str()?;
                let cidrs = item.get("cidrs")?.as_array()?;
                Some((id.to_string(), cidrs.len()))
            })
            .collect();
        Self(counts)
    }

    /// Load counts from the catalog at `path`, degrading to an empty baseline
    /// on any read or parse failure.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Self {
        if !fs.exists(path) {
            debug!("No previous catalog at {:?}; growth guard has no baseline", path);
            return Self::default();
        }
        let content = match fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read previous catalog {:?}: {}; continuing without baseline", path, e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("Previous catalog {:?} is not valid JSON: {}; continuing without baseline", path, e);
                Self::default()
            }
        }
    }
}

impl FromIterator<(String, usize)> for BaselineCounts {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fields compared per set by the equivalence check
const CHECKED_SET_FIELDS: &[&str] = &[
    "id",
    "label",
    "provider",
    "source_url",
    "source_timestamp",
    "source_timestamp_unix",
    "cidrs",
    "version",
];

/// Canonical form used by the equivalence check.
///
/// Drops `generated_at`/`generated_at_unix` and unknown fields, drops
/// non-object set entries, and sorts sets by id.
pub fn normalize_for_check(value: &Value) -> Value {
    let mut sets: Vec<Value> = value
        .get("sets")
        .and_then(Value::as_array)
        .map(|sets| {
            sets.iter()
                .filter(|item| item.is_object())
                .map(|item| {
                    let fields: serde_json::Map<String, Value> = CHECKED_SET_FIELDS
                        .iter()
                        .map(|field| {
                            (
                                field.to_string(),
                                item.get(*field).cloned().unwrap_or(Value::Null),
                            )
                        })
                        .collect();
                    Value::Object(fields)
                })
                .collect()
        })
        .unwrap_or_default();
    sets.sort_by_key(set_sort_key);

    json!({
        "catalog_version": value.get("catalog_version").cloned().unwrap_or(Value::Null),
        "sets": sets,
    })
}

fn set_sort_key(set: &Value) -> String {
    match set.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// One reason an on-disk catalog is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    CatalogVersion { current: String, rebuilt: String },
    MissingSet(String),
    UnexpectedSet(String),
    ChangedSet(String),
    /// Set lists differ in a way not attributable to one id (e.g. duplicates)
    SetLayout,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difference::CatalogVersion { current, rebuilt } => {
                write!(f, "catalog_version {} != {}", current, rebuilt)
            }
            Difference::MissingSet(id) => write!(f, "set {} missing from current file", id),
            Difference::UnexpectedSet(id) => write!(f, "set {} no longer produced", id),
            Difference::ChangedSet(id) => write!(f, "set {} changed", id),
            Difference::SetLayout => write!(f, "set list layout differs"),
        }
    }
}

/// Compare a persisted document against a freshly built catalog.
///
/// Returns an empty list when they are equivalent.
pub fn diff_for_check(current: &Value, rebuilt: &Catalog) -> Result<Vec<Difference>> {
    let rebuilt = serde_json::to_value(rebuilt).context("Failed to serialize catalog")?;
    let current = normalize_for_check(current);
    let rebuilt = normalize_for_check(&rebuilt);
    if current == rebuilt {
        return Ok(Vec::new());
    }

    let mut differences = Vec::new();
    if current["catalog_version"] != rebuilt["catalog_version"] {
        differences.push(Difference::CatalogVersion {
            current: current["catalog_version"].to_string(),
            rebuilt: rebuilt["catalog_version"].to_string(),
        });
    }

    let by_id = |doc: &Value| -> BTreeMap<String, Value> {
        doc["sets"]
            .as_array()
            .map(|sets| sets.iter().map(|s| (set_sort_key(s), s.clone())).collect())
            .unwrap_or_default()
    };
    let current_sets = by_id(&current);
    let rebuilt_sets = by_id(&rebuilt);

    for (id, set) in &rebuilt_sets {
        match current_sets.get(id) {
            None => differences.push(Difference::MissingSet(id.clone())),
            Some(existing) if existing != set => {
                differences.push(Difference::ChangedSet(id.clone()))
            }
            Some(_) => {}
        }
    }
    for id in current_sets.keys() {
        if !rebuilt_sets.contains_key(id) {
            differences.push(Difference::UnexpectedSet(id.clone()));
        }
    }

    if differences.is_empty() {
        differences.push(Difference::SetLayout);
    }
    Ok(differences)
}
