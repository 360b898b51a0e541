pub mod init;
mod project;
pub mod sync;
pub mod watch;

pub use project::Project;
