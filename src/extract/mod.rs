//! Extraction collaborator: turns tracked source files into declarations.
//!
//! ## Module Structure
//!
//! - `collector`: AST visitor that reads literal declarations
//! - `parser`: swc parsing of TypeScript/JavaScript modules
//! - `scanner`: Tracked-file provider (walks the source root)

pub mod collector;
pub mod parser;
pub mod scanner;

use std::{fs, path::Path};

use rayon::prelude::*;

use crate::core::{ExtractedSet, ExtractionEntry, IntlError, TrackedFiles};
use collector::{DeclarationImport, collect_module};
use parser::parse_source;

pub use scanner::{ScanOptions, ScanResult, scan_tracked_files};

/// Produces the translations declared by each tracked file.
pub trait Extractor {
    fn extract(&self, tracked: &TrackedFiles) -> Result<ExtractedSet, IntlError>;
}

/// Reads literal declarations without executing any code.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    import: DeclarationImport,
}

impl StaticExtractor {
    pub fn new(import: DeclarationImport) -> Self {
        Self { import }
    }

    pub fn extract_file(&self, path: &Path) -> Result<Vec<ExtractionEntry>, IntlError> {
        let failure = |reason: String| IntlError::Extraction {
            file: path.to_path_buf(),
            reason,
        };

        let code = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
        let parsed = parse_source(code, path).map_err(|e| failure(e.to_string()))?;
        let collector = collect_module(&parsed.module, &self.import, &parsed.source_map);

        if let Some(error) = collector.errors.first() {
            return Err(failure(format!("line {}: {}", error.line, error.message)));
        }
        Ok(collector.entries)
    }
}

impl Extractor for StaticExtractor {
    fn extract(&self, tracked: &TrackedFiles) -> Result<ExtractedSet, IntlError> {
        let extracted = tracked
            .par_iter()
            .map(|path| self.extract_file(path).map(|entries| (path.clone(), entries)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(files = extracted.len(), "extraction finished");
        Ok(extracted.into_iter().collect())
    }
}
