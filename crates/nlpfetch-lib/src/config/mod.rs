mod loader;
mod model;

pub use loader::load_config;
pub use model::{ArchiveDef, Config, ResourceDef, ResourceKind, default_resources};

use std::path::{Path, PathBuf};

/// Picks the directory the resource layout is rooted at.
///
/// An explicit override wins over the configured base directory, which wins over the working
/// directory. `cwd` is only called when neither of the first two is set.
pub fn resolve_base_dir(
    override_dir: Option<&Path>,
    config: &Config,
    cwd: impl FnOnce() -> std::io::Result<PathBuf>,
) -> std::io::Result<PathBuf> {
    match override_dir
        .map(Path::to_path_buf)
        .or_else(|| config.base_dir.clone())
    {
        Some(base_dir) => Ok(base_dir),
        None => cwd(),
    }
}
