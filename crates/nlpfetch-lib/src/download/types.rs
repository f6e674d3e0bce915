use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the archive lives on disk
    pub path: PathBuf,
    /// Verified on-disk size in bytes
    pub size: u64,
    /// Whether bytes were fetched during this call, as opposed to reusing an existing file
    pub transferred: bool,
}
