use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Result;
use regex::Regex;

use super::super::args::CommonArgs;
use crate::{
    build::BuildPipeline,
    config::{Config, load_config},
    core::RepositoryOptions,
    extract::{ScanOptions, ScanResult, StaticExtractor, collector::DeclarationImport, scan_tracked_files},
};

/// Configuration with command-line overrides applied and paths resolved.
pub struct Project {
    pub config: Config,
    pub root: PathBuf,
    pub source_root: PathBuf,
    filepath_filter: Regex,
    import: DeclarationImport,
}

impl Project {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir()?;
        let loaded = load_config(&cwd)?;
        let mut config = loaded.config;

        // Paths given on the command line are relative to the working directory.
        if let Some(language) = &common.default_language {
            config.default_language = language.clone();
        }
        if let Some(path) = &common.export_path {
            config.export_path = absolute(&cwd, path);
        }
        if let Some(path) = &common.source_root {
            config.source_root = absolute(&cwd, path);
        }
        config.validate()?;

        tracing::debug!(
            root = %loaded.project_root.display(),
            from_file = loaded.from_file,
            "configuration loaded"
        );

        Ok(Self {
            filepath_filter: config.filepath_regex()?,
            import: config.declaration_import(),
            source_root: config.source_root(&loaded.project_root),
            root: loaded.project_root,
            config,
        })
    }

    pub fn repository_options(&self, check_only: bool) -> Result<RepositoryOptions> {
        let mut options = self.config.repository_options(&self.root)?;
        options.check_only |= check_only;
        Ok(options)
    }

    pub fn pipeline(&self, check_only: bool) -> Result<BuildPipeline<StaticExtractor>> {
        Ok(BuildPipeline::new(
            StaticExtractor::new(self.import.clone()),
            self.repository_options(check_only)?,
        ))
    }

    pub fn scan(&self) -> ScanResult {
        let result = scan_tracked_files(
            &self.source_root,
            &ScanOptions {
                includes: &self.config.includes,
                ignores: &self.config.ignores,
                filepath_filter: &self.filepath_filter,
                import: &self.import,
            },
        );
        if result.skipped_count > 0 {
            tracing::warn!("{} path(s) could not be accessed while scanning", result.skipped_count);
        }
        tracing::debug!(
            tracked = result.files.len(),
            candidates = result.candidate_count,
            "scan finished"
        );
        result
    }
}

fn absolute(cwd: &Path, path: &Path) -> String {
    cwd.join(path).to_string_lossy().into_owned()
}
