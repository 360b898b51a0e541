use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, declarations, stderr};

#[test]
fn test_sync_creates_default_language_resource() -> Result<()> {
    let test = CliTest::with_file(
        "src/home.intl.ts",
        &declarations(&[("home.title", "Welcome"), ("home.cta", "Get started")]),
    )?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Synced 2 translations from 1 tracked file, wrote 1 resource file

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("intl/intl.en-US.json")?,
        "{\n  \"home.cta\": \"Get started\",\n  \"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_sync_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;
    test.run(&["sync"])?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Resources up to date (1 translation from 1 tracked file)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_sync_carries_translations_through_rename() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("home.greeting", "Hello")]))?;
    test.write_file("intl/intl.en-US.json", r#"{ "greeting": "Hello", "stale": "Bye" }"#)?;
    test.write_file("intl/intl.de.json", r#"{ "greeting": "Hallo", "stale": "Tschüss" }"#)?;

    let output = test.command().arg("sync").env("RUST_LOG", "info").output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    assert_eq!(
        test.read_file("intl/intl.en-US.json")?,
        "{\n  \"home.greeting\": \"Hello\"\n}\n"
    );
    assert_eq!(
        test.read_file("intl/intl.de.json")?,
        "{\n  \"home.greeting\": \"Hallo\"\n}\n"
    );

    let logs = stderr(&output);
    assert!(logs.contains("greeting => home.greeting"), "{}", logs);
    assert!(logs.contains("stale"), "{}", logs);

    Ok(())
}

#[test]
fn test_sync_updates_default_values() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome!")]))?;
    test.write_file("intl/intl.en-US.json", r#"{ "title": "Welcome" }"#)?;
    test.write_file("intl/intl.fr.json", r#"{ "title": "Bienvenue" }"#)?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Synced 1 translation from 1 tracked file, wrote 2 resource files

    ----- stderr -----
    ");

    assert_eq!(test.read_file("intl/intl.en-US.json")?, "{\n  \"title\": \"Welcome!\"\n}\n");
    assert_eq!(test.read_file("intl/intl.fr.json")?, "{\n  \"title\": \"Bienvenue\"\n}\n");

    Ok(())
}

#[test]
fn test_sync_clears_removed_keys() -> Result<()> {
    let test = CliTest::with_file(
        "src/home.intl.ts",
        "import { defineTranslations } from '@enhanced-dom/intl';\n\
         export const messages = defineTranslations({});\n",
    )?;
    test.write_file("intl/intl.en-US.json", r#"{ "gone": "Gone" }"#)?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Synced 0 translations from 1 tracked file, wrote 1 resource file

    ----- stderr -----
    ");
    assert_eq!(test.read_file("intl/intl.en-US.json")?, "{}\n");

    assert_cmd_snapshot!(test.command().arg("check"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Resources up to date (0 translations from 1 tracked file)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_sync_tracks_files_importing_declarations() -> Result<()> {
    let test = CliTest::with_file(
        "src/components/button.tsx",
        "import { defineTranslations as t } from '@enhanced-dom/intl';\n\
         const messages = t({ label: { key: 'button.label', default: 'Click' } });\n\
         export const Button = () => <button>{messages.label}</button>;\n",
    )?;
    test.write_file("node_modules/lib/vendor.intl.ts", &declarations(&[("vendor", "Nope")]))?;

    let output = test.run(&["sync"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        test.read_file("intl/intl.en-US.json")?,
        "{\n  \"button.label\": \"Click\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_sync_with_cli_overrides() -> Result<()> {
    let test = CliTest::with_file("app/home.intl.ts", &declarations(&[("title", "Willkommen")]))?;

    let output = test.run(&[
        "sync",
        "--default-language",
        "de",
        "--export-path",
        "locales",
        "--source-root",
        "app",
    ])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        test.read_file("locales/intl.de.json")?,
        "{\n  \"title\": \"Willkommen\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_sync_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".intlrc.json",
        r#"{ "exportPath": "./public/locales", "filenameTemplate": "{language}.json" }"#,
    )?;
    test.write_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    let output = test.run(&["sync"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(test.root().join("public/locales/en-US.json").exists());

    Ok(())
}

#[test]
fn test_sync_rejects_duplicate_keys() -> Result<()> {
    let test = CliTest::with_file("src/a.intl.ts", &declarations(&[("shared", "A")]))?;
    test.write_file("src/b.intl.ts", &declarations(&[("shared", "B")]))?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ 1 duplicate translation key(s): shared
    ");
    assert!(!test.root().join("intl").exists());

    Ok(())
}

#[test]
fn test_sync_reports_non_literal_declarations() -> Result<()> {
    let test = CliTest::with_file(
        "src/home.intl.ts",
        "import { defineTranslations } from '@enhanced-dom/intl';\n\
         defineTranslations(loadMessages());\n",
    )?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("sync"), @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✘ extraction failed for [TEMP]/src/home.intl.ts: line 2: defineTranslations expects an object literal
        ");
    });

    Ok(())
}

#[test]
fn test_sync_rejects_invalid_resource() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;
    test.write_file("intl/intl.de.json", r#"{ "title": { "nested": "x" } }"#)?;

    let output = test.run(&["sync"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("intl.de.json"));

    Ok(())
}

#[test]
fn test_sync_check_flag_does_not_write() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    assert_cmd_snapshot!(test.command().args(["sync", "--check"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ translation resources are out of date (1 added, 0 removed, 0 renamed)
    Run intl-sync sync to update the resource files.
    ");
    assert!(!test.root().join("intl").exists());

    Ok(())
}

#[test]
fn test_sync_without_tracked_files_skips() -> Result<()> {
    let test = CliTest::with_file("src/plain.ts", "export const x = 1;\n")?;

    assert_cmd_snapshot!(test.command().arg("sync"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No tracked file changed since the last pass

    ----- stderr -----
    ");

    Ok(())
}
