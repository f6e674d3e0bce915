mod installer;
mod types;

pub use installer::{install_all, install_resource, resource_status};
pub use types::{InstallOutcome, InstallReport, ResourceStatus};
