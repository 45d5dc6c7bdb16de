//! Collaborator seams used by the paginator.
//!
//! The search engine never talks HTTP itself. It hands a [`PageRequest`] to a
//! [`PageFetcher`] and paces itself through an [`Evade`] hook, both of which
//! are supplied by the caller.

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Accept header selecting the normalized (`data` + `included`) response shape.
pub const NORMALIZED_JSON: &str = "application/vnd.linkedin.normalized+json+2.1";

/// One page request: a path relative to the API base, query string included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Relative path with its encoded query string
    pub path: String,
    /// Extra headers for this request only
    pub headers: Vec<(String, String)>,
}

impl PageRequest {
    /// Create a request for `path` with no extra headers.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: Vec::new(),
        }
    }

    /// Request the normalized response shape.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.headers
            .push(("accept".to_string(), NORMALIZED_JSON.to_string()));
        self
    }
}

/// Source of raw JSON pages.
///
/// Implementations own transport, headers, timeouts and any retry policy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page.
    ///
    /// # Errors
    /// Returns a [`FetchError`] for HTTP failures, transport failures or an
    /// undecodable body. A page with no results is `Ok`.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Value, FetchError>;
}

/// Pacing hook awaited before every page request.
#[async_trait]
pub trait Evade: Send + Sync {
    /// Wait before the next request.
    async fn delay(&self);
}

/// Evasion hook that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Evade for NoDelay {
    async fn delay(&self) {}
}
