//! One build pass: cache check, extraction, reconciliation, persistence.
//!
//! The pipeline owns the [`ChangeDetectionCache`], so fingerprints live
//! exactly as long as the pipeline. A one-shot CLI run creates one pipeline;
//! `watch` keeps the same pipeline across every pass.

use crate::{
    core::{
        CacheDecision, ChangeDetectionCache, ExportReport, IntlError, RepositoryOptions,
        ResourceRepository, TrackedFiles,
    },
    extract::Extractor,
};

/// What a successful pass did.
#[derive(Debug)]
pub enum PassOutcome {
    /// Tracked content unchanged; nothing was extracted.
    Skipped,
    Synced(ExportReport),
}

pub struct BuildPipeline<E> {
    cache: ChangeDetectionCache,
    extractor: E,
    options: RepositoryOptions,
}

impl<E: Extractor> BuildPipeline<E> {
    pub fn new(extractor: E, options: RepositoryOptions) -> Self {
        Self {
            cache: ChangeDetectionCache::new(),
            extractor,
            options,
        }
    }

    pub fn run_pass(&mut self, tracked: &TrackedFiles) -> Result<PassOutcome, IntlError> {
        match self.cache.check_and_update(tracked) {
            CacheDecision::Skip => {
                tracing::info!("Tracked files have not changed. Skipping extraction");
                return Ok(PassOutcome::Skipped);
            }
            CacheDecision::Failed(files) => return Err(IntlError::FilesInaccessible { files }),
            CacheDecision::Proceed => {}
        }

        tracing::info!(files = tracked.len(), "Starting intl extraction");
        let extracted = self.extractor.extract(tracked)?;

        // Resources are loaded fresh for every pass.
        let repository = ResourceRepository::new(self.options.clone());
        match repository.export(&extracted) {
            Ok(report) => Ok(PassOutcome::Synced(report)),
            Err(err) => {
                if err.is_resource_side() {
                    self.cache.invalidate();
                }
                Err(err)
            }
        }
    }
}
