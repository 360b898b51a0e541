//! Reconciliation engine and change-detection cache.
//!
//! ## Module Structure
//!
//! - `cache`: Content fingerprints that gate a pass
//! - `error`: Error taxonomy shared by every pass
//! - `reconcile`: Validation, diff, and merge of declarations against resources
//! - `resources`: Loading and persisting per-language resource files
//! - `template`: Resource filename matcher/extractor/expander
//! - `types`: Data model

pub mod cache;
pub mod error;
pub mod reconcile;
pub mod resources;
pub mod template;
pub mod types;

pub use cache::{CacheDecision, ChangeDetectionCache, Fingerprint};
pub use error::{DuplicateKey, IntlError};
pub use reconcile::Reconciler;
pub use resources::{ExportReport, RepositoryOptions, ResourceRepository};
pub use template::FilenameTemplate;
pub use types::{
    ExtractedSet, ExtractionEntry, LanguageResourceFile, LoadedResources, ReconciliationResult,
    ResourceKeyRecord, TrackedFiles,
};
