use crate::config::ResourceKind;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Marker was already on disk; nothing was touched
    AlreadyPresent,
    /// Archives were fetched and unpacked during this run
    Installed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub kind: ResourceKind,
    pub outcome: InstallOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceStatus {
    pub kind: ResourceKind,
    pub name: String,
    pub marker: PathBuf,
    pub installed: bool,
}
