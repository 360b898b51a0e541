//! Tracked-file provider.
//!
//! A source file is tracked when its path matches the configured filter
//! (`*.intl.ts` by default) or when it imports the declaration function.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use super::{
    collector::{DeclarationBindings, DeclarationImport},
    parser::parse_source,
};
use crate::core::TrackedFiles;

const SCANNABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub filepath_filter: &'a Regex,
    pub import: &'a DeclarationImport,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: TrackedFiles,
    /// Candidates looked at, tracked or not.
    pub candidate_count: usize,
    /// Paths that could not be walked.
    pub skipped_count: usize,
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn scan_tracked_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if options.includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in options.includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => tracing::warn!("Invalid glob pattern '{}': {}", inc, e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!("Include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    let mut candidates: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_scan {
        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| e.file_name() != "node_modules");
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::debug!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_scannable_file(path) {
                candidates.push(path.to_path_buf());
            }
        }
    }
    candidates.sort();
    candidates.dedup();

    let files: TrackedFiles = candidates
        .par_iter()
        .filter(|path| is_tracked(path, options))
        .cloned()
        .collect();

    ScanResult {
        files,
        candidate_count: candidates.len(),
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext))
}

fn is_tracked(path: &Path, options: &ScanOptions<'_>) -> bool {
    if options.filepath_filter.is_match(&path.to_string_lossy()) {
        return true;
    }
    imports_declaration(path, options.import)
}

/// True if the file imports the declaration function.
///
/// Files that cannot be read or parsed are not tracked; a cheap text check
/// avoids parsing files that never mention the import source.
fn imports_declaration(path: &Path, import: &DeclarationImport) -> bool {
    let Ok(code) = fs::read_to_string(path) else {
        return false;
    };
    if !code.contains(&import.source) || !code.contains(&import.name) {
        return false;
    }
    match parse_source(code, path) {
        Ok(parsed) => !DeclarationBindings::collect(&parsed.module, import).is_empty(),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping unparsable file");
            false
        }
    }
}
