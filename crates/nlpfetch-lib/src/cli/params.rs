use crate::config::Config;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct InstallParams {
    pub app_config: Config,
    pub base_dir: PathBuf,
    pub show_progress: bool,
}

#[derive(Debug, Clone)]
pub struct StatusParams {
    pub app_config: Config,
    pub base_dir: PathBuf,
    pub format: StatusFormat,
}
