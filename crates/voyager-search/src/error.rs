use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query facet {field}: {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    #[error("page fetch at offset {offset} failed: {source}")]
    FetchFailed {
        offset: usize,
        #[source]
        source: FetchError,
    },

    #[error("malformed page: {0}")]
    MalformedPage(String),
}

/// Failure reported by a [`crate::PageFetcher`].
///
/// HTTP-level failures are kept apart from transport failures so callers can
/// tell a rejected session from a dropped connection. An empty result page is
/// never an error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Body(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidQuery {
            field: "regions",
            reason: "empty value".to_string(),
        };
        assert_eq!(err.to_string(), "invalid query facet regions: empty value");

        let err = SearchError::FetchFailed {
            offset: 98,
            source: FetchError::Status {
                status: 429,
                path: "/search/blended".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "page fetch at offset 98 failed: HTTP 429 for /search/blended"
        );
    }
}
