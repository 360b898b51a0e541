use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta::Settings;
use insta_cmd::{assert_cmd_snapshot, get_cargo_bin};
use tempfile::TempDir;

mod sync;
mod watch;

const BIN_NAME: &str = "intl-sync";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops config discovery at the project directory.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("RUST_LOG", "off"); // Keep timestamped log lines out of snapshots
        cmd
    }

    /// Snapshot settings that replace the project directory with `[TEMP]`.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::clone_current();
        settings.add_filter(&regex::escape(&self.project_dir.display().to_string()), "[TEMP]");
        settings
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {} {:?}", BIN_NAME, args))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// A tracked declaration file with the given `(key, default)` pairs.
pub fn declarations(entries: &[(&str, &str)]) -> String {
    let body: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, (key, default))| {
            format!("  m{}: {{ key: '{}', default: '{}' }},", i, key, default)
        })
        .collect();
    format!(
        "import {{ defineTranslations }} from '@enhanced-dom/intl';\n\n\
         export const messages = defineTranslations({{\n{}\n}});\n",
        body.join("\n")
    )
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&["--help"])?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["sync", "check", "watch", "init"] {
        assert!(out.contains(command), "help should list `{}`", command);
    }

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".intlrc.json", r#"{ "filenameTemplate": "intl.json" }"#)?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid 'filenameTemplate': invalid filename template "intl.json": expected exactly one {language} placeholder
    "#);

    Ok(())
}

#[test]
fn test_unreadable_default_language_is_a_config_error() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    assert_cmd_snapshot!(test.command().args(["sync", "--default-language", "zh-Hant-TW"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'defaultLanguage' "zh-Hant-TW" would not be read back through filename template "intl.{language}.json"
    "#);
    assert!(!test.root().join("intl").exists());

    Ok(())
}

#[test]
fn test_unreadable_default_language_in_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".intlrc.json",
        r#"{ "defaultLanguage": "zh-Hant-TW", "filenameTemplate": "{language}.json" }"#,
    )?;

    let output = test.run(&["check"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(r#"'defaultLanguage' "zh-Hant-TW""#));

    Ok(())
}
