//! Diff and merge of extracted declarations against persisted resources.
//!
//! ## Algorithm
//!
//! 1. Validate that no key is declared by more than one file.
//! 2. Flatten the extracted set into `key -> default`, keeping file order and
//!    declaration order.
//! 3. Walk the flattened keys and settle each against the default-language
//!    resource:
//!    - key present: retained, every language carries its value forward
//!    - key missing, exactly one matching old key: renamed
//!    - otherwise: added
//!
//!    Whatever stays unconsumed in the default-language resource is removed.
//!
//! Non-default languages never drive the diff; they follow whatever key the
//! default language settles on.
//!
//! ## Rename matching
//!
//! An old key `A` (present in the default-language resource, not redeclared)
//! is renamed to a new key `B` (declared, absent from the default-language
//! resource) when `A` holds exactly `B`'s default value and the pairing is
//! unambiguous on both sides: `A` is the only such old key, and `B` is the
//! only missing key declaring that value. Ambiguous pairings are treated as
//! plain additions and removals. The outcome does not depend on the order in
//! which keys are visited.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{
    error::{DuplicateKey, IntlError},
    types::{ExtractedSet, LoadedResources, ReconciliationResult, ResourceKeyRecord},
};

#[derive(Debug, Clone)]
pub struct Reconciler {
    default_language: String,
}

impl Reconciler {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }

    /// Validate, flatten, and diff `extracted` against the resources returned
    /// by `load_existing`.
    ///
    /// `load_existing` is only called once validation has passed.
    pub fn reconcile<F>(
        &self,
        extracted: &ExtractedSet,
        load_existing: F,
    ) -> Result<ReconciliationResult, IntlError>
    where
        F: FnOnce() -> Result<LoadedResources, IntlError>,
    {
        validate(extracted)?;
        let flattened = flatten(extracted);
        let resources = load_existing()?;
        Ok(self.detect_changes(&flattened, resources))
    }

    fn detect_changes(
        &self,
        flattened: &[(String, String)],
        mut resources: LoadedResources,
    ) -> ReconciliationResult {
        let default_entries = resources
            .get(&self.default_language)
            .map(|file| file.entries.clone());
        let renames = default_entries
            .as_ref()
            .map(|entries| find_renames(flattened, entries))
            .unwrap_or_default();

        let mut result = ReconciliationResult::default();

        for (key, default) in flattened {
            let source_key = match &default_entries {
                Some(entries) if entries.contains_key(key) => key.as_str(),
                Some(_) => match renames.get(key.as_str()) {
                    Some(&old) => {
                        result.renamed.insert(old.to_string(), key.clone());
                        old
                    }
                    None => {
                        result.added.push(key.clone());
                        key.as_str()
                    }
                },
                None => {
                    result.added.push(key.clone());
                    key.as_str()
                }
            };

            let mut per_language = BTreeMap::new();
            for (language, file) in resources.iter_mut() {
                if let Some(value) = file.entries.remove(source_key)
                    && *language != self.default_language
                {
                    per_language.insert(language.clone(), value);
                }
            }
            per_language.insert(self.default_language.clone(), default.clone());

            result.merged.push(ResourceKeyRecord {
                key: key.clone(),
                default: default.clone(),
                per_language,
            });
        }

        result.removed = resources
            .remove(&self.default_language)
            .map(|file| file.entries.into_keys().collect())
            .unwrap_or_default();

        result
    }
}

/// Fail when any key is declared by more than one file.
pub fn validate(extracted: &ExtractedSet) -> Result<(), IntlError> {
    let mut declared_in: BTreeMap<&str, Vec<&std::path::Path>> = BTreeMap::new();
    for (file, entries) in extracted {
        for entry in entries {
            let files = declared_in.entry(entry.key.as_str()).or_default();
            if files.last() != Some(&file.as_path()) {
                files.push(file.as_path());
            }
        }
    }

    let duplicates: Vec<DuplicateKey> = declared_in
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(key, files)| DuplicateKey {
            key: key.to_string(),
            files: files.into_iter().map(|f| f.to_path_buf()).collect(),
        })
        .collect();

    if duplicates.is_empty() {
        tracing::debug!("No duplicate translations found");
        return Ok(());
    }

    for duplicate in &duplicates {
        tracing::error!("{}", duplicate);
    }
    Err(IntlError::DuplicateKeys { duplicates })
}

/// Collapse per-file declarations into `(key, default)` pairs.
///
/// A key declared twice in the same file keeps its position and takes the
/// last default.
pub fn flatten(extracted: &ExtractedSet) -> Vec<(String, String)> {
    let mut flattened: Vec<(String, String)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for entry in extracted.values().flatten() {
        match positions.get(entry.key.as_str()) {
            Some(&index) => flattened[index].1 = entry.default.clone(),
            None => {
                positions.insert(entry.key.as_str(), flattened.len());
                flattened.push((entry.key.clone(), entry.default.clone()));
            }
        }
    }
    flattened
}

/// New key -> old key, for every unambiguous rename.
fn find_renames<'a>(
    flattened: &'a [(String, String)],
    default_entries: &'a BTreeMap<String, String>,
) -> HashMap<&'a str, &'a str> {
    let declared: HashSet<&str> = flattened.iter().map(|(key, _)| key.as_str()).collect();

    let mut missing_by_value: HashMap<&str, Vec<&str>> = HashMap::new();
    for (key, default) in flattened {
        if !default_entries.contains_key(key) {
            missing_by_value
                .entry(default.as_str())
                .or_default()
                .push(key.as_str());
        }
    }

    let mut stale_by_value: HashMap<&str, Vec<&str>> = HashMap::new();
    for (key, value) in default_entries {
        if !declared.contains(key.as_str()) {
            stale_by_value
                .entry(value.as_str())
                .or_default()
                .push(key.as_str());
        }
    }

    missing_by_value
        .into_iter()
        .filter_map(|(value, new_keys)| match (new_keys.as_slice(), stale_by_value.get(value)) {
            ([new_key], Some(old_keys)) if old_keys.len() == 1 => Some((*new_key, old_keys[0])),
            _ => None,
        })
        .collect()
}
