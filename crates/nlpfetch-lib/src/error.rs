use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem operation failed at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid download URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to download {url}: {source}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Verification(#[from] crate::verification::VerificationError),

    #[error("Failed to extract archive {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive {path} contains no entries")]
    EmptyArchive { path: PathBuf },

    #[error("Archive {path} contains an entry that escapes the destination: {entry}")]
    UnsafeEntry { path: PathBuf, entry: String },

    #[error("Invalid argument: {details}")]
    CliArgumentValidation { details: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

impl NlpFetchError {
    pub(crate) fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
