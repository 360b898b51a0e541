use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        FilenameTemplate, RepositoryOptions,
        resources::{DEFAULT_EXPORT_PATH, DEFAULT_LANGUAGE},
        template::DEFAULT_FILENAME_TEMPLATE,
    },
    extract::collector::DeclarationImport,
};

pub const CONFIG_FILE_NAME: &str = ".intlrc.json";

pub const DEFAULT_FILEPATH_FILTER: &str = r"\.intl\.[cm]?[jt]sx?$";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_export_path")]
    pub export_path: String,
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
    #[serde(default)]
    pub check_only: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_filepath_filter")]
    pub filepath_filter: String,
    #[serde(default = "default_import_source")]
    pub import_source: String,
    #[serde(default = "default_import_name")]
    pub import_name: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_PATH.to_string()
}

fn default_filename_template() -> String {
    DEFAULT_FILENAME_TEMPLATE.to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_filepath_filter() -> String {
    DEFAULT_FILEPATH_FILTER.to_string()
}

fn default_import_source() -> String {
    DeclarationImport::default().source
}

fn default_import_name() -> String {
    DeclarationImport::default().name
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            export_path: default_export_path(),
            filename_template: default_filename_template(),
            check_only: false,
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: Vec::new(),
            filepath_filter: default_filepath_filter(),
            import_source: default_import_source(),
            import_name: default_import_name(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern, the filepath filter, or the
    /// filename template is invalid, or if the default language does not
    /// survive a round trip through the template.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        self.filepath_regex()?;
        let template = self.template()?;

        if self.default_language.trim().is_empty() {
            anyhow::bail!("'defaultLanguage' must not be empty");
        }
        if !template.accepts_language(&self.default_language) {
            anyhow::bail!(
                "'defaultLanguage' \"{}\" would not be read back through filename template \"{}\"",
                self.default_language,
                self.filename_template
            );
        }

        Ok(())
    }

    pub fn filepath_regex(&self) -> Result<Regex> {
        Regex::new(&self.filepath_filter).with_context(|| {
            format!(
                "Invalid regular expression in 'filepathFilter': \"{}\"",
                self.filepath_filter
            )
        })
    }

    pub fn template(&self) -> Result<FilenameTemplate> {
        FilenameTemplate::parse(&self.filename_template)
            .context("Invalid 'filenameTemplate'")
    }

    pub fn declaration_import(&self) -> DeclarationImport {
        DeclarationImport {
            source: self.import_source.clone(),
            name: self.import_name.clone(),
        }
    }

    /// Repository options with `exportPath` resolved against `project_root`.
    pub fn repository_options(&self, project_root: &Path) -> Result<RepositoryOptions> {
        Ok(RepositoryOptions {
            export_path: resolve(project_root, &self.export_path),
            default_language: self.default_language.clone(),
            filename_template: self.template()?,
            check_only: self.check_only,
        })
    }

    pub fn source_root(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.source_root)
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub project_root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                project_root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            project_root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
