//! Content fingerprinting that decides whether a pass needs to run at all.
//!
//! The cache remembers the SHA-512 digest of every tracked file as of the last
//! pass that observed a change. A pass whose fingerprints are identical to the
//! stored ones is skipped, so extraction runs at most once per content change.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use sha2::{Digest, Sha512};

use super::types::TrackedFiles;

/// Observed state of one tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    /// Hex-encoded SHA-512 of the file content.
    Digest(String),
    Inaccessible,
}

/// Outcome of comparing current content against the stored fingerprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecision {
    /// Nothing changed since the last observed change.
    Skip,
    /// Content changed and every file was readable.
    Proceed,
    /// Content changed but these files could not be read.
    Failed(Vec<PathBuf>),
}

#[derive(Debug, Default)]
pub struct ChangeDetectionCache {
    fingerprints: BTreeMap<PathBuf, Fingerprint>,
}

impl ChangeDetectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint `tracked` and compare with the previous observation.
    ///
    /// All reads run in parallel; the decision is taken once every read has
    /// finished. Whenever the fingerprints differ they replace the stored
    /// ones, even when some files were inaccessible.
    pub fn check_and_update(&mut self, tracked: &TrackedFiles) -> CacheDecision {
        let current: BTreeMap<PathBuf, Fingerprint> = tracked
            .par_iter()
            .map(|path| (path.clone(), fingerprint(path)))
            .collect();

        if current == self.fingerprints {
            tracing::debug!(files = current.len(), "fingerprints unchanged");
            return CacheDecision::Skip;
        }

        let inaccessible: Vec<PathBuf> = current
            .iter()
            .filter(|(_, fp)| **fp == Fingerprint::Inaccessible)
            .map(|(path, _)| path.clone())
            .collect();
        self.fingerprints = current;

        if inaccessible.is_empty() {
            CacheDecision::Proceed
        } else {
            CacheDecision::Failed(inaccessible)
        }
    }

    /// Forget every fingerprint so the next check proceeds.
    pub fn invalidate(&mut self) {
        self.fingerprints.clear();
    }

    pub fn fingerprint_of(&self, path: &Path) -> Option<&Fingerprint> {
        self.fingerprints.get(path)
    }
}

fn fingerprint(path: &Path) -> Fingerprint {
    match fs::read(path) {
        Ok(content) => Fingerprint::Digest(hex::encode(Sha512::digest(&content))),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "cannot read tracked file");
            Fingerprint::Inaccessible
        }
    }
}
