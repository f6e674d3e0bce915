use super::types::{InstallOutcome, InstallReport, ResourceStatus};
use crate::archive::{top_level_dir, unzip, unzip_into};
use crate::config::ResourceDef;
use crate::download::{ProgressReporter, maybe_download};
use crate::error::NlpFetchError;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};

/// Reports whether `resource` is installed under `base_dir` without touching the network.
pub fn resource_status(base_dir: &Path, resource: &ResourceDef) -> ResourceStatus {
    let marker = base_dir.join(&resource.marker);
    ResourceStatus {
        kind: resource.kind,
        name: resource.kind.to_string(),
        installed: marker.exists(),
        marker,
    }
}

/// Installs a single resource unless its marker already exists.
///
/// Every archive is downloaded, unpacked into the resource's target directory and removed.
/// With a separate download directory, all archives are fetched and verified before the
/// target directory is created. When the resource asks for it, the top-level directory of the
/// first archive is renamed to its canonical name afterwards.
pub async fn install_resource(
    client: &Client,
    base_dir: &Path,
    resource: &ResourceDef,
    progress: &mut dyn ProgressReporter,
) -> Result<InstallOutcome, NlpFetchError> {
    let marker = base_dir.join(&resource.marker);
    if marker.exists() {
        info!("Found {} - skip", resource.kind);
        return Ok(InstallOutcome::AlreadyPresent);
    }

    let target_dir = base_dir.join(&resource.target_dir);
    let mut extracted_top_level = None;

    match &resource.download_dir {
        Some(download_dir) => {
            let download_dir = base_dir.join(download_dir);
            let mut downloaded = Vec::with_capacity(resource.archives.len());
            for archive in &resource.archives {
                downloaded.push(maybe_download(client, archive, &download_dir, progress).await?);
            }

            create_dir(&target_dir).await?;
            for file in downloaded {
                record_top_level(resource, &mut extracted_top_level, &file.path)?;
                unzip_into(&file.path, &target_dir)?;
            }
        }
        None => {
            create_dir(&target_dir).await?;
            for archive in &resource.archives {
                let file = maybe_download(client, archive, &target_dir, progress).await?;
                record_top_level(resource, &mut extracted_top_level, &file.path)?;
                unzip(&file.path)?;
            }
        }
    }

    if let (Some(from), Some(to)) = (extracted_top_level, &resource.rename_top_level_to) {
        if &from != to {
            let from_path = target_dir.join(&from);
            let to_path = target_dir.join(to);
            debug!(from = %from_path.display(), to = %to_path.display(), "Renaming extracted directory");
            tokio::fs::rename(&from_path, &to_path)
                .await
                .map_err(|e| NlpFetchError::file_system(&from_path, e))?;
        }
    }

    info!("{} installed into {}", resource.kind, target_dir.display());
    Ok(InstallOutcome::Installed)
}

async fn create_dir(dir: &Path) -> Result<(), NlpFetchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| NlpFetchError::file_system(dir, e))
}

fn record_top_level(
    resource: &ResourceDef,
    top_level: &mut Option<String>,
    archive_path: &Path,
) -> Result<(), NlpFetchError> {
    if resource.rename_top_level_to.is_some() && top_level.is_none() {
        *top_level = Some(top_level_dir(archive_path)?);
    }
    Ok(())
}

/// Installs `resources` one after another, stopping at the first failure.
pub async fn install_all(
    client: &Client,
    base_dir: &Path,
    resources: &[ResourceDef],
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<InstallReport>, NlpFetchError> {
    let mut reports = Vec::with_capacity(resources.len());
    for resource in resources {
        let outcome = install_resource(client, base_dir, resource, progress).await?;
        reports.push(InstallReport {
            kind: resource.kind,
            outcome,
        });
    }
    Ok(reports)
}
