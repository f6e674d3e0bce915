use crate::error::NlpFetchError;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tracing::{info, trace};
use zip::ZipArchive;
use zip::result::ZipError;

fn open_archive(archive_path: &Path) -> Result<ZipArchive<File>, NlpFetchError> {
    let file = File::open(archive_path).map_err(|e| NlpFetchError::file_system(archive_path, e))?;
    ZipArchive::new(file).map_err(|source| NlpFetchError::Extraction {
        path: archive_path.to_path_buf(),
        source,
    })
}

/// Name of the directory the archive's first entry lives under, as recorded in the archive itself.
pub fn top_level_dir(archive_path: &Path) -> Result<String, NlpFetchError> {
    let mut archive = open_archive(archive_path)?;
    if archive.is_empty() {
        return Err(NlpFetchError::EmptyArchive {
            path: archive_path.to_path_buf(),
        });
    }

    let first = archive
        .by_index(0)
        .map_err(|source| NlpFetchError::Extraction {
            path: archive_path.to_path_buf(),
            source,
        })?;
    let first_name = first.name().to_string();

    match first
        .enclosed_name()
        .and_then(|name| name.components().next().map(|c| c.as_os_str().to_owned()))
    {
        Some(component) => Ok(component.to_string_lossy().into_owned()),
        None => Err(NlpFetchError::UnsafeEntry {
            path: archive_path.to_path_buf(),
            entry: first_name,
        }),
    }
}

/// Extracts every entry next to the archive, then deletes the archive.
///
/// On failure the archive is left where it is.
pub fn unzip(archive_path: &Path) -> Result<PathBuf, NlpFetchError> {
    let destination = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    unzip_into(archive_path, &destination)?;
    Ok(destination)
}

/// Extracts every entry into `destination`, then deletes the archive.
pub fn unzip_into(archive_path: &Path, destination: &Path) -> Result<(), NlpFetchError> {
    info!("Extracting: {}", archive_path.display());

    extract_zip(archive_path, destination)?;

    std::fs::remove_file(archive_path).map_err(|e| NlpFetchError::file_system(archive_path, e))
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<(), NlpFetchError> {
    let extraction_error = |source: ZipError| NlpFetchError::Extraction {
        path: archive_path.to_path_buf(),
        source,
    };

    let mut archive = open_archive(archive_path)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(extraction_error)?;
        let relative = match entry.enclosed_name() {
            Some(path) if path.components().all(|c| matches!(c, Component::Normal(_))) => {
                path.to_path_buf()
            }
            _ => {
                return Err(NlpFetchError::UnsafeEntry {
                    path: archive_path.to_path_buf(),
                    entry: entry.name().to_string(),
                });
            }
        };
        let outpath = destination.join(&relative);
        trace!(entry = %relative.display(), "Extracting entry");

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath).map_err(|e| NlpFetchError::file_system(&outpath, e))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent).map_err(|e| NlpFetchError::file_system(parent, e))?;
        }
        let mut outfile =
            File::create(&outpath).map_err(|e| NlpFetchError::file_system(&outpath, e))?;
        // Corrupt deflate streams and CRC mismatches surface here as I/O errors
        std::io::copy(&mut entry, &mut outfile).map_err(|e| extraction_error(ZipError::Io(e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| NlpFetchError::file_system(&outpath, e))?;
            }
        }
    }

    Ok(())
}
