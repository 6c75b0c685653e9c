use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::category::{NameLookup, StatCategory};
use super::error::StatsError;

/// One stats dictionary entry, in dense-index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    /// Key of the entry in the JSON object.
    pub key: String,
    /// Stable id; the key when the entry carries none.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
}

/// Stats dictionaries loaded from the game's JSON files.
///
/// Each file is an object keyed by stats id. The game assigns component
/// indices in key order, so entries are sorted by key before indexing.
///
/// # Examples
/// ```text
/// use wzreplay_core::stats::{NameLookup, StatCategory, StatsCatalog};
///
/// let catalog = StatsCatalog::default()
///     .with_table_json(StatCategory::Body, r#"{"B": {"name": "Bug"}, "A": {"name": "Anvil"}}"#)
///     .unwrap();
/// assert_eq!(catalog.lookup(StatCategory::Body, 0), Some("Anvil"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsCatalog {
    tables: BTreeMap<StatCategory, Vec<StatEntry>>,
}

impl StatsCatalog {
    /// Load every category file from `dir`.
    ///
    /// # Errors
    /// Returns `StatsError` naming the first file that is missing or
    /// malformed.
    pub fn load(dir: &Path) -> Result<Self, StatsError> {
        let mut catalog = Self::default();
        for category in StatCategory::ALL {
            let path = dir.join(category.file_name());
            let text = fs::read_to_string(&path).map_err(|source| StatsError::Io {
                category,
                path: path.clone(),
                source,
            })?;
            let entries = parse_table(&text).map_err(|source| StatsError::Json {
                category,
                path: path.clone(),
                source,
            })?;
            debug!(%category, entries = entries.len(), path = %path.display(), "stats table loaded");
            catalog.tables.insert(category, entries);
        }
        Ok(catalog)
    }

    /// Replace one table from JSON text.
    pub fn with_table_json(mut self, category: StatCategory, json: &str) -> Result<Self, StatsError> {
        let entries = parse_table(json).map_err(|source| StatsError::Json {
            category,
            path: PathBuf::from(category.file_name()),
            source,
        })?;
        self.tables.insert(category, entries);
        Ok(self)
    }

    pub fn entries(&self, category: StatCategory) -> &[StatEntry] {
        self.tables
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn entry(&self, category: StatCategory, index: u32) -> Option<&StatEntry> {
        self.entries(category).get(index as usize)
    }
}

impl NameLookup for StatsCatalog {
    fn lookup(&self, category: StatCategory, index: u32) -> Option<&str> {
        self.entry(category, index).map(|entry| entry.name.as_str())
    }

    fn lookup_id(&self, category: StatCategory, index: u32) -> Option<&str> {
        self.entry(category, index).map(|entry| entry.id.as_str())
    }

    fn entry_count(&self, category: StatCategory) -> usize {
        self.entries(category).len()
    }
}

fn parse_table(json: &str) -> Result<Vec<StatEntry>, serde_json::Error> {
    let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|(key, entry)| StatEntry {
            id: entry.id.unwrap_or_else(|| key.clone()),
            key,
            name: entry.name,
        })
        .collect())
}
