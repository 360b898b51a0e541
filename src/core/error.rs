//! Error types for extraction and reconciliation passes.

use std::{fmt, path::PathBuf};

/// A key declared in more than one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Every file declaring the key, in extraction order.
    pub files: Vec<PathBuf>,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files: Vec<String> = self
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        write!(
            f,
            "translation with key {} appears in multiple files: {}",
            self.key,
            files.join(", ")
        )
    }
}

/// Every way a pass can fail.
///
/// All variants abort the pass before any resource file is written.
#[derive(Debug, thiserror::Error)]
pub enum IntlError {
    /// One or more tracked files could not be read while fingerprinting.
    #[error("could not access files: {}", display_paths(.files))]
    FilesInaccessible { files: Vec<PathBuf> },

    /// The same key is declared by two or more files.
    #[error("{} duplicate translation key(s): {}", .duplicates.len(), display_duplicates(.duplicates))]
    DuplicateKeys { duplicates: Vec<DuplicateKey> },

    /// Check-only mode found resources that are out of date.
    #[error(
        "translation resources are out of date ({added} added, {removed} removed, {renamed} renamed)"
    )]
    ChangesDetected {
        added: usize,
        removed: usize,
        renamed: usize,
    },

    /// The extraction collaborator could not produce declarations for a file.
    #[error("extraction failed for {}: {reason}", .file.display())]
    Extraction { file: PathBuf, reason: String },

    #[error("resource I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A resource file is not a flat JSON object of strings.
    #[error("invalid resource file {}: {reason}", .path.display())]
    InvalidResource { path: PathBuf, reason: String },

    #[error("invalid filename template \"{template}\": expected exactly one {{language}} placeholder")]
    InvalidTemplate { template: String },
}

impl IntlError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures that can be fixed without touching a tracked file.
    pub fn is_resource_side(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::InvalidResource { .. })
    }
}

fn display_paths(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_duplicates(duplicates: &[DuplicateKey]) -> String {
    duplicates
        .iter()
        .map(|d| d.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
