//! Pass summaries for the terminal.
//!
//! Kept apart from the pipeline so the library never prints.

use std::io::{self, Write};

use colored::Colorize;

use crate::{
    build::PassOutcome,
    config::CONFIG_FILE_NAME,
    core::{ExportReport, IntlError},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn print_outcome(outcome: &PassOutcome, tracked: usize) {
    print_outcome_to(outcome, tracked, &mut io::stdout().lock());
}

pub fn print_outcome_to<W: Write>(outcome: &PassOutcome, tracked: usize, writer: &mut W) {
    let msg = match outcome {
        PassOutcome::Skipped => "No tracked file changed since the last pass".to_string(),
        PassOutcome::Synced(report) => synced_message(report, tracked),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn synced_message(report: &ExportReport, tracked: usize) -> String {
    let keys = report.result.merged.len();
    let checked = format!(
        "{} {} from {} tracked {}",
        keys,
        plural(keys, "translation", "translations"),
        tracked,
        plural(tracked, "file", "files"),
    );
    if report.written.is_empty() {
        format!("Resources up to date ({})", checked)
    } else {
        format!(
            "Synced {}, wrote {} resource {}",
            checked,
            report.written.len(),
            plural(report.written.len(), "file", "files"),
        )
    }
}

pub fn print_failure(err: &IntlError) {
    print_failure_to(err, &mut io::stderr().lock());
}

pub fn print_failure_to<W: Write>(err: &IntlError, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), err.to_string().red());
    if let IntlError::ChangesDetected { .. } = err {
        let _ = writeln!(
            writer,
            "Run {} to update the resource files.",
            "intl-sync sync".cyan()
        );
    }
}

pub fn print_init() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}
