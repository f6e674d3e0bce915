use crate::error::NlpFetchError;
use url::Url;

/// Returns the last path segment of `url`, which names the downloaded file on disk.
pub fn file_name_from_url(url: &str) -> Result<String, NlpFetchError> {
    let parsed = Url::parse(url).map_err(|e| NlpFetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NlpFetchError::InvalidUrl {
            url: url.to_string(),
            reason: "URL path has no file name".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_url_takes_last_segment() {
        assert_eq!(
            file_name_from_url("http://nlp.stanford.edu/software/stanford-parser-full-2015-01-29.zip")
                .unwrap(),
            "stanford-parser-full-2015-01-29.zip"
        );
    }

    #[test]
    fn test_file_name_from_url_ignores_query() {
        assert_eq!(
            file_name_from_url("http://127.0.0.1:8080/uploads/sick_train.zip?token=abc").unwrap(),
            "sick_train.zip"
        );
    }

    #[test]
    fn test_file_name_from_url_rejects_directory_urls() {
        assert!(matches!(
            file_name_from_url("http://alt.qcri.org/semeval2014/"),
            Err(NlpFetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            file_name_from_url("http://alt.qcri.org"),
            Err(NlpFetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_file_name_from_url_rejects_garbage() {
        assert!(matches!(
            file_name_from_url("not a url"),
            Err(NlpFetchError::InvalidUrl { .. })
        ));
    }
}
