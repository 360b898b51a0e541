//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Extract declarations and update the resource files
//! - `check`: Fail if the resource files are out of date
//! - `watch`: Re-run `sync` whenever tracked files change
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Watch(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all pass-running commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Language whose values come from the declarations (overrides config file)
    #[arg(long)]
    pub default_language: Option<String>,

    /// Directory holding the resource files (overrides config file)
    #[arg(long)]
    pub export_path: Option<PathBuf>,

    /// Directory scanned for tracked files (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report drift instead of writing resource files
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Milliseconds between passes
    #[arg(long, default_value_t = 1000)]
    pub interval: u64,

    /// Stop after this many passes (default: run until interrupted)
    #[arg(long)]
    pub passes: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation declarations and update the resource files
    Sync(SyncCommand),
    /// Verify the resource files match the declarations without writing
    Check(CheckCommand),
    /// Run sync repeatedly, skipping passes when nothing changed
    Watch(WatchCommand),
    /// Initialize a new .intlrc.json configuration file
    Init,
}
