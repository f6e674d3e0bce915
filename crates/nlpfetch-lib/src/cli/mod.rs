mod args;
mod install;
mod params;
mod resolved_command;
mod status;

pub use args::{Args, Command, parse_args};
pub use install::run_install;
pub use params::{InstallParams, StatusFormat, StatusParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use status::{collect_status, run_status};
