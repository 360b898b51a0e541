//! Persisted per-language resource files.
//!
//! Resources live in one directory, one flat JSON object per language, named
//! by a [`FilenameTemplate`]. They are loaded at most once per repository and
//! written back only when their serialized content actually changes.

use std::{
    cell::OnceCell,
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{
    error::IntlError,
    reconcile::Reconciler,
    template::FilenameTemplate,
    types::{ExtractedSet, LanguageResourceFile, LoadedResources, ReconciliationResult},
};

pub const DEFAULT_LANGUAGE: &str = "en-US";

pub const DEFAULT_EXPORT_PATH: &str = "./intl";

#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    pub export_path: PathBuf,
    pub default_language: String,
    pub filename_template: FilenameTemplate,
    /// Verify instead of writing; drift becomes an error.
    pub check_only: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            default_language: DEFAULT_LANGUAGE.to_string(),
            filename_template: FilenameTemplate::default(),
            check_only: false,
        }
    }
}

/// What one export did.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub result: ReconciliationResult,
    /// Resource files whose content was (re)written.
    pub written: Vec<PathBuf>,
}

pub struct ResourceRepository {
    options: RepositoryOptions,
    resources: OnceCell<LoadedResources>,
}

impl ResourceRepository {
    pub fn new(options: RepositoryOptions) -> Self {
        Self {
            options,
            resources: OnceCell::new(),
        }
    }

    pub fn resource_path(&self, language: &str) -> PathBuf {
        self.options
            .export_path
            .join(self.options.filename_template.expand(language))
    }

    /// Resources currently on disk, loaded on first access.
    pub fn resources(&self) -> Result<&LoadedResources, IntlError> {
        if let Some(resources) = self.resources.get() {
            return Ok(resources);
        }
        let loaded = load_resources(&self.options.export_path, &self.options.filename_template)?;
        Ok(self.resources.get_or_init(|| loaded))
    }

    /// Reconcile `extracted` with the resources on disk, then persist the result
    /// (or, in check-only mode, fail when anything would change).
    pub fn export(&self, extracted: &ExtractedSet) -> Result<ExportReport, IntlError> {
        let reconciler = Reconciler::new(self.options.default_language.clone());
        let result = reconciler.reconcile(extracted, || self.resources().cloned())?;
        log_changes(&result);

        if self.options.check_only {
            if result.has_changes() {
                return Err(IntlError::ChangesDetected {
                    added: result.added.len(),
                    removed: result.removed.len(),
                    renamed: result.renamed.len(),
                });
            }
            return Ok(ExportReport {
                result,
                written: Vec::new(),
            });
        }

        let written = self.save(&result)?;
        if !written.is_empty() {
            tracing::info!(
                "Saved exported translations to {}",
                self.options.export_path.display()
            );
        }
        Ok(ExportReport { result, written })
    }

    /// Write every referenced language whose serialized content differs.
    ///
    /// The default-language file is also rewritten when keys were removed,
    /// even if no declaration is left, so removals do not linger on disk.
    ///
    /// Every changed file is first staged next to its target; targets are
    /// replaced only once all staging writes succeeded. A failed staging
    /// write leaves every resource untouched. A failure while renaming can
    /// still leave earlier languages replaced.
    fn save(&self, result: &ReconciliationResult) -> Result<Vec<PathBuf>, IntlError> {
        let mut languages = result.by_language();
        if !result.removed.is_empty() {
            languages
                .entry(self.options.default_language.clone())
                .or_default();
        }

        let mut pending: Vec<(PathBuf, String)> = Vec::new();
        for (language, entries) in languages {
            let path = self.resource_path(&language);
            let content = serialize_resource(&entries)?;
            match fs::read_to_string(&path) {
                Ok(existing) if existing == content => {
                    tracing::debug!(path = %path.display(), "resource unchanged");
                }
                Ok(_) => pending.push((path, content)),
                Err(err) if err.kind() == ErrorKind::NotFound => pending.push((path, content)),
                Err(err) => return Err(IntlError::io(path, err)),
            }
        }

        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let export_path = &self.options.export_path;
        fs::create_dir_all(export_path).map_err(|e| IntlError::io(export_path, e))?;

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(pending.len());
        for (path, content) in pending {
            let tmp = staging_path(&path);
            if let Err(err) = fs::write(&tmp, content) {
                let _ = fs::remove_file(&tmp);
                for (staged_tmp, _) in &staged {
                    let _ = fs::remove_file(staged_tmp);
                }
                return Err(IntlError::io(tmp, err));
            }
            staged.push((tmp, path));
        }

        let mut written = Vec::with_capacity(staged.len());
        let mut staged = staged.into_iter();
        while let Some((tmp, path)) = staged.next() {
            if let Err(err) = fs::rename(&tmp, &path) {
                let _ = fs::remove_file(&tmp);
                for (rest, _) in staged {
                    let _ = fs::remove_file(rest);
                }
                return Err(IntlError::io(path, err));
            }
            tracing::debug!(path = %path.display(), "resource written");
            written.push(path);
        }
        Ok(written)
    }
}

/// `intl.en-US.json` -> `intl.en-US.json.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read every resource in `export_path` whose name matches `template`.
///
/// A directory that cannot be listed holds no resources.
pub fn load_resources(
    export_path: &Path,
    template: &FilenameTemplate,
) -> Result<LoadedResources, IntlError> {
    let mut resources = LoadedResources::new();

    let dir = match fs::read_dir(export_path) {
        Ok(dir) => dir,
        Err(err) => {
            tracing::debug!(
                path = %export_path.display(),
                error = %err,
                "no prior resources"
            );
            return Ok(resources);
        }
    };

    for entry in dir {
        let entry = entry.map_err(|e| IntlError::io(export_path, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(language) = entry.file_name().to_str().and_then(|n| template.extract(n)) else {
            continue;
        };
        let entries = parse_resource(&path)?;
        resources.insert(
            language.clone(),
            LanguageResourceFile { language, entries },
        );
    }

    Ok(resources)
}

fn parse_resource(path: &Path) -> Result<BTreeMap<String, String>, IntlError> {
    let content = fs::read_to_string(path).map_err(|e| IntlError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| IntlError::InvalidResource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Sorted keys, 2-space indentation, trailing newline.
pub fn serialize_resource(entries: &BTreeMap<String, String>) -> Result<String, IntlError> {
    let content =
        serde_json::to_string_pretty(entries).map_err(|e| IntlError::InvalidResource {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;
    Ok(format!("{}\n", content))
}

fn log_changes(result: &ReconciliationResult) {
    if !result.added.is_empty() {
        tracing::info!(
            "Added {} translation(s) to the resources:\n{}",
            result.added.len(),
            result.added.join("\n")
        );
    }

    if !result.removed.is_empty() {
        tracing::warn!(
            "Removed {} translation(s) no longer declared:\n{}",
            result.removed.len(),
            result.removed.join("\n")
        );
    }

    if !result.renamed.is_empty() {
        let pairs: Vec<String> = result
            .renamed
            .iter()
            .map(|(old, new)| format!("{} => {}", old, new))
            .collect();
        tracing::warn!(
            "Renamed {} translation(s), keeping their translated values:\n{}",
            result.renamed.len(),
            pairs.join("\n")
        );
    }
}
