//! Command-line interface layer.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, CheckCommand, Command, CommonArgs, SyncCommand, WatchCommand};
pub use exit_status::ExitStatus;

use crate::logging::init_tracing;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    init_tracing(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    Ok(run::run(args)?.into())
}
