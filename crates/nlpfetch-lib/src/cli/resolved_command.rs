use crate::cli::args::Command;
use crate::cli::params::{InstallParams, StatusFormat, StatusParams};
use crate::config::{Config, load_config, resolve_base_dir};
use crate::error::NlpFetchError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Install(InstallParams),
    Status(StatusParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, NlpFetchError> {
    match command {
        Command::Install {
            config_path,
            base_dir,
            show_progress,
        } => {
            let (app_config, base_dir) = resolve_location(config_path, base_dir)?;

            if let Some(resource) = app_config.resources.iter().find(|r| r.archives.is_empty()) {
                return Err(NlpFetchError::CliArgumentValidation {
                    details: format!("Resource '{}' has no archives configured.", resource.kind),
                });
            }

            Ok(ResolvedCommand::Install(InstallParams {
                app_config,
                base_dir,
                show_progress,
            }))
        }
        Command::Status {
            config_path,
            base_dir,
            format,
        } => {
            let format = match format.as_str() {
                "text" => StatusFormat::Text,
                "json" => StatusFormat::Json,
                other => {
                    return Err(NlpFetchError::CliArgumentValidation {
                        details: format!("Unknown format '{other}'. Use 'text' or 'json'."),
                    });
                }
            };
            let (app_config, base_dir) = resolve_location(config_path, base_dir)?;

            Ok(ResolvedCommand::Status(StatusParams {
                app_config,
                base_dir,
                format,
            }))
        }
    }
}

fn resolve_location(
    config_path: Option<String>,
    base_dir: Option<String>,
) -> Result<(Config, PathBuf), NlpFetchError> {
    let app_config = match config_path {
        Some(config_path) => load_config(&config_path)?,
        None => Config::default(),
    };

    if app_config.resources.is_empty() {
        return Err(NlpFetchError::CliArgumentValidation {
            details: "No resources defined in config".to_string(),
        });
    }

    let base_dir = resolve_base_dir(
        base_dir.as_deref().map(Path::new),
        &app_config,
        std::env::current_dir,
    )?;
    Ok((app_config, base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_to_builtin_resources() {
        let command = Command::Install {
            config_path: None,
            base_dir: Some("/srv/nlp".to_string()),
            show_progress: false,
        };

        match resolve_command(command).unwrap() {
            ResolvedCommand::Install(params) => {
                assert_eq!(params.base_dir, PathBuf::from("/srv/nlp"));
                assert_eq!(params.app_config, Config::default());
                assert!(!params.show_progress);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_status_format_is_rejected() {
        let command = Command::Status {
            config_path: None,
            base_dir: None,
            format: "xml".to_string(),
        };

        assert!(matches!(
            resolve_command(command),
            Err(NlpFetchError::CliArgumentValidation { .. })
        ));
    }

    #[test]
    fn test_config_with_empty_resource_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nlpfetch.yaml");
        std::fs::write(&path, "resources: []\n").unwrap();

        let command = Command::Install {
            config_path: Some(path.to_str().unwrap().to_string()),
            base_dir: None,
            show_progress: true,
        };

        assert!(matches!(
            resolve_command(command),
            Err(NlpFetchError::CliArgumentValidation { .. })
        ));
    }
}
