use crate::cli::{StatusFormat, StatusParams};
use crate::error::NlpFetchError;
use crate::install::{ResourceStatus, resource_status};

pub fn collect_status(params: &StatusParams) -> Vec<ResourceStatus> {
    params
        .app_config
        .resources
        .iter()
        .map(|resource| resource_status(&params.base_dir, resource))
        .collect()
}

pub fn run_status(params: StatusParams) -> Result<(), NlpFetchError> {
    let statuses = collect_status(&params);

    match params.format {
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&statuses)?),
        StatusFormat::Text => {
            for status in &statuses {
                let state = if status.installed {
                    "installed"
                } else {
                    "missing"
                };
                println!("{:<20} {:<10} {}", status.name, state, status.marker.display());
            }
        }
    }
    Ok(())
}
