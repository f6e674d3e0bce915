use crate::cli::InstallParams;
use crate::download::{NoProgress, ProgressReporter, TerminalProgress, build_http_client};
use crate::error::NlpFetchError;
use crate::install::{InstallOutcome, InstallReport, install_all};
use tracing;

pub async fn run_install(params: InstallParams) -> Result<Vec<InstallReport>, NlpFetchError> {
    let InstallParams {
        app_config,
        base_dir,
        show_progress,
    } = params;

    tracing::info!(
        "Installing {} resources into {}",
        app_config.resources.len(),
        base_dir.display()
    );

    let client = build_http_client()?;
    let mut progress: Box<dyn ProgressReporter> = if show_progress {
        Box::new(TerminalProgress::new())
    } else {
        Box::new(NoProgress)
    };

    let reports = install_all(
        &client,
        &base_dir,
        &app_config.resources,
        progress.as_mut(),
    )
    .await?;

    let installed = reports
        .iter()
        .filter(|r| r.outcome == InstallOutcome::Installed)
        .count();
    tracing::info!(
        "Done: {} installed, {} already present",
        installed,
        reports.len() - installed
    );
    Ok(reports)
}
