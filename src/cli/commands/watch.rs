use std::{thread, time::Duration};

use anyhow::Result;

use super::{
    super::{
        args::WatchCommand,
        exit_status::ExitStatus,
        report::{print_failure, print_outcome},
    },
    Project,
};

/// Runs passes until `--passes` is reached, or forever.
///
/// Every pass rescans the source root so new tracked files are picked up.
/// A failed pass is reported and the loop keeps going; the exit status
/// reflects the last pass.
pub fn watch(cmd: WatchCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let mut pipeline = project.pipeline(false)?;
    let interval = Duration::from_millis(cmd.interval);

    tracing::info!(
        source_root = %project.source_root.display(),
        "Watching tracked files every {}ms",
        cmd.interval
    );

    let mut pass = 0;
    loop {
        pass += 1;
        let tracked = project.scan().files;
        let status = match pipeline.run_pass(&tracked) {
            Ok(outcome) => {
                print_outcome(&outcome, tracked.len());
                ExitStatus::Success
            }
            Err(err) => {
                print_failure(&err);
                ExitStatus::Failure
            }
        };

        if cmd.passes.is_some_and(|limit| pass >= limit) {
            return Ok(status);
        }
        thread::sleep(interval);
    }
}
