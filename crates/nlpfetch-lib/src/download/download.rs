use super::progress::ProgressReporter;
use super::types::DownloadedFile;
use crate::config::ArchiveDef;
use crate::error::NlpFetchError;
use crate::utils::file_name_from_url;
use crate::verification::verify_file_size;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("nlpfetch/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Result<Client, NlpFetchError> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Makes sure `archive` is present in `dest_dir` and has the expected size.
///
/// A file already sitting under the URL's file name is reused without any network request;
/// its size is still checked. A mismatching file is left on disk for inspection.
pub async fn maybe_download(
    client: &Client,
    archive: &ArchiveDef,
    dest_dir: &Path,
    progress: &mut dyn ProgressReporter,
) -> Result<DownloadedFile, NlpFetchError> {
    let file_name = file_name_from_url(&archive.url)?;
    let output_path = dest_dir.join(&file_name);

    let transferred = if output_path.exists() {
        debug!(url = %archive.url, output = %output_path.display(), "File exists, skipping download");
        false
    } else {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| NlpFetchError::file_system(dest_dir, e))?;

        info!("Downloading file {}...", archive.url);
        let result = stream_to_file(client, &archive.url, &output_path, &file_name, progress).await;
        progress.finish();
        let bytes = result?;
        debug!(url = %archive.url, bytes, "Transfer finished");
        true
    };

    let size = verify_file_size(&output_path, archive.expected_size)?;
    info!("File {} successfully loaded", file_name);

    Ok(DownloadedFile {
        path: output_path,
        size,
        transferred,
    })
}

async fn stream_to_file(
    client: &Client,
    url: &str,
    output_path: &Path,
    file_name: &str,
    progress: &mut dyn ProgressReporter,
) -> Result<u64, NlpFetchError> {
    let transfer_error = |source| NlpFetchError::Transfer {
        url: url.to_string(),
        source,
    };

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(transfer_error)?;

    progress.start(file_name, response.content_length())?;

    let file = tokio::fs::File::create(output_path)
        .await
        .map_err(|e| NlpFetchError::file_system(output_path, e))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await.map_err(transfer_error)? {
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| NlpFetchError::file_system(output_path, e))?;
        written += chunk.len() as u64;
        progress.advance(chunk.len() as u64);
    }

    writer
        .flush()
        .await
        .map_err(|e| NlpFetchError::file_system(output_path, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::NoProgress;
    use crate::verification::VerificationError;

    // Nothing listens on the discard port, so any request would fail loudly.
    const UNREACHABLE: &str = "http://127.0.0.1:9/archives/fixture.zip";

    #[tokio::test]
    async fn test_existing_file_is_reused_without_request() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fixture.zip"), b"cached").unwrap();

        let client = build_http_client().unwrap();
        let archive = ArchiveDef {
            url: UNREACHABLE.to_string(),
            expected_size: Some(6),
        };

        let downloaded = maybe_download(&client, &archive, dir.path(), &mut NoProgress)
            .await
            .unwrap();

        assert!(!downloaded.transferred);
        assert_eq!(downloaded.size, 6);
        assert_eq!(downloaded.path, dir.path().join("fixture.zip"));
    }

    #[tokio::test]
    async fn test_existing_file_with_wrong_size_is_rejected_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.zip");
        std::fs::write(&path, b"truncated").unwrap();

        let client = build_http_client().unwrap();
        let archive = ArchiveDef {
            url: UNREACHABLE.to_string(),
            expected_size: Some(1024),
        };

        let result = maybe_download(&client, &archive, dir.path(), &mut NoProgress).await;

        assert!(matches!(
            result,
            Err(NlpFetchError::Verification(VerificationError::SizeMismatch {
                expected: 1024,
                actual: 9,
                ..
            }))
        ));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transfer_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();

        let result = maybe_download(
            &client,
            &ArchiveDef::new(UNREACHABLE),
            dir.path(),
            &mut NoProgress,
        )
        .await;

        assert!(matches!(result, Err(NlpFetchError::Transfer { .. })));
        assert!(!dir.path().join("fixture.zip").exists());
    }
}
