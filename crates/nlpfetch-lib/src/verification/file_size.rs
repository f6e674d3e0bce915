use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error(
        "Unexpected size for {}: expected {expected} bytes, got {actual} bytes. \
         Please get the file using a browser.",
        .path.display()
    )]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("Failed to read metadata of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Checks the on-disk size of `path` against `expected`, returning the actual size.
///
/// `None` disables the check and accepts any size.
pub fn verify_file_size(path: &Path, expected: Option<u64>) -> Result<u64, VerificationError> {
    let actual = std::fs::metadata(path)
        .map_err(|source| VerificationError::Metadata {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    match expected {
        Some(expected) if expected != actual => Err(VerificationError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        }),
        _ => Ok(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![b'x'; len]).unwrap();
        path
    }

    #[test]
    fn test_accepts_any_size_without_expectation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.zip", 17);

        assert_eq!(verify_file_size(&path, None).unwrap(), 17);
    }

    #[test]
    fn test_accepts_matching_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.zip", 42);

        assert_eq!(verify_file_size(&path, Some(42)).unwrap(), 42);
    }

    #[test]
    fn test_rejects_mismatched_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.zip", 10);

        match verify_file_size(&path, Some(11)) {
            Err(VerificationError::SizeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 11);
                assert_eq!(actual, 10);
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
        assert!(path.exists(), "mismatched file must stay on disk");
    }

    #[test]
    fn test_missing_file_is_a_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = verify_file_size(&dir.path().join("missing.zip"), None);

        assert!(matches!(result, Err(VerificationError::Metadata { .. })));
    }
}
