use anyhow::Result;

use super::{
    super::{
        args::{CheckCommand, SyncCommand},
        exit_status::ExitStatus,
        report::{print_failure, print_outcome},
    },
    Project,
};

pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    run_once(&Project::load(&cmd.common)?, cmd.check)
}

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    run_once(&Project::load(&cmd.common)?, true)
}

fn run_once(project: &Project, check_only: bool) -> Result<ExitStatus> {
    let mut pipeline = project.pipeline(check_only)?;
    let tracked = project.scan().files;

    match pipeline.run_pass(&tracked) {
        Ok(outcome) => {
            print_outcome(&outcome, tracked.len());
            Ok(ExitStatus::Success)
        }
        Err(err) => {
            print_failure(&err);
            Ok(ExitStatus::Failure)
        }
    }
}
