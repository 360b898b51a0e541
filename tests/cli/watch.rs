use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, declarations, stderr};

#[test]
fn test_watch_skips_unchanged_passes() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    assert_cmd_snapshot!(test.command().args(["watch", "--interval", "10", "--passes", "3"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Synced 1 translation from 1 tracked file, wrote 1 resource file
    ✓ No tracked file changed since the last pass
    ✓ No tracked file changed since the last pass

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_watch_logs_skipped_extraction() -> Result<()> {
    let test = CliTest::with_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    let output = test
        .command()
        .args(["watch", "--interval", "10", "--passes", "2"])
        .env("RUST_LOG", "info")
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Skipping extraction"));

    Ok(())
}

#[test]
fn test_watch_continues_after_failed_pass() -> Result<()> {
    let test = CliTest::with_file("src/a.intl.ts", &declarations(&[("shared", "A")]))?;
    test.write_file("src/b.intl.ts", &declarations(&[("shared", "B")]))?;

    // The failing content is fingerprinted, so the second pass is skipped.
    assert_cmd_snapshot!(test.command().args(["watch", "--interval", "10", "--passes", "2"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No tracked file changed since the last pass

    ----- stderr -----
    ✘ 1 duplicate translation key(s): shared
    ");

    Ok(())
}

#[test]
fn test_watch_check_only_fails_on_last_pass() -> Result<()> {
    let test = CliTest::with_file(".intlrc.json", r#"{ "checkOnly": true }"#)?;
    test.write_file("src/home.intl.ts", &declarations(&[("title", "Welcome")]))?;

    assert_cmd_snapshot!(test.command().args(["watch", "--interval", "10", "--passes", "1"]), @r"
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
