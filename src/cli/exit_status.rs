use std::process::ExitCode;

/// Process exit status.
///
/// A skipped pass counts as `Success`. `Failure` covers pass errors such as
/// duplicate keys, drift in check-only mode, inaccessible tracked files and
/// extraction failures. `Error` means the command never ran a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    /// Configuration or other internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
