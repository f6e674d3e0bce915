mod download;
mod progress;
mod types;

pub use download::{build_http_client, maybe_download};
pub use progress::{NoProgress, ProgressReporter, TerminalProgress};
pub use types::DownloadedFile;
