use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, sync, watch::watch},
    exit_status::ExitStatus,
};

/// Dispatches to the command handler.
///
/// `Ok(Failure)` means the pass completed and found a problem; `Err` means
/// the command could not run (configuration, working directory).
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Sync(cmd)) => sync::sync(cmd),
        Some(Command::Check(cmd)) => sync::check(cmd),
        Some(Command::Watch(cmd)) => watch(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
