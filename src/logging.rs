use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = concat!("info,", env!("CARGO_CRATE_NAME"), "=debug");

/// Install the global subscriber. Diagnostics go to stderr so stdout only
/// carries command output.
///
/// `RUST_LOG` wins unless `--verbose` is given; the fallback level is `info`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
