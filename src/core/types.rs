//! Data model shared by the cache, the extractor, and the reconciler.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

/// Paths of the source files that declare translations.
pub type TrackedFiles = BTreeSet<PathBuf>;

/// One declared translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionEntry {
    pub key: String,
    pub default: String,
}

impl ExtractionEntry {
    pub fn new(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
        }
    }
}

/// Declaring file -> entries in declaration order.
pub type ExtractedSet = BTreeMap<PathBuf, Vec<ExtractionEntry>>;

/// Persisted translations of a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageResourceFile {
    pub language: String,
    pub entries: BTreeMap<String, String>,
}

impl LanguageResourceFile {
    pub fn with_entries<K, V>(language: impl Into<String>, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            language: language.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Language code -> resource file, as found in the export directory.
pub type LoadedResources = BTreeMap<String, LanguageResourceFile>;

/// Reconciled state of a single key across all languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKeyRecord {
    pub key: String,
    pub default: String,
    pub per_language: BTreeMap<String, String>,
}

/// Outcome of diffing extracted declarations against persisted resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Records in the iteration order of the flattened declarations.
    pub merged: Vec<ResourceKeyRecord>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Old key -> new key.
    pub renamed: BTreeMap<String, String>,
}

impl ReconciliationResult {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.renamed.is_empty()
    }

    pub fn record(&self, key: &str) -> Option<&ResourceKeyRecord> {
        self.merged.iter().find(|r| r.key == key)
    }

    /// Language -> key -> value, for every language referenced by a record.
    pub fn by_language(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut languages: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for record in &self.merged {
            for (language, value) in &record.per_language {
                languages
                    .entry(language.clone())
                    .or_default()
                    .insert(record.key.clone(), value.clone());
            }
        }
        languages
    }
}
