//! People search orchestration.
//!
//! This module provides [`PeopleSearch`], which ties the query encoder, the
//! paginator and the response merger together: every page is encoded at the
//! current offset, fetched, parsed and merged into the accumulated records.

use crate::error::{Result, SearchError};
use crate::fetch::{Evade, PageFetcher};
use crate::merger::{ResponseMerger, ResultRecord};
use crate::page::SearchPage;
use crate::paginator::{
    Accumulator, PageLimits, PageOutcome, Paginator, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
};
use crate::query::{encode, Origin, SearchQuery};
use serde_json::Value;

/// Caller options for one people search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of records, unbounded when `None`
    pub limit: Option<usize>,
    /// Hits requested per page
    pub page_size: usize,
    /// Ceiling on page requests when a limit is set
    pub max_pages: usize,
    /// Keep members without a public identifier
    pub include_private_profiles: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            include_private_profiles: false,
        }
    }
}

impl SearchOptions {
    /// Stop after `limit` records.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Keep or drop members without a public identifier.
    #[must_use]
    pub fn with_private_profiles(mut self, include: bool) -> Self {
        self.include_private_profiles = include;
        self
    }

    fn limits(&self) -> PageLimits {
        PageLimits {
            limit: self.limit,
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}

/// Runs paginated people searches over a fetcher.
pub struct PeopleSearch<'a> {
    fetcher: &'a dyn PageFetcher,
    evade: &'a dyn Evade,
    origin: Option<Origin>,
}

impl<'a> PeopleSearch<'a> {
    /// Create a people search over `fetcher`, pacing requests with `evade`.
    #[must_use]
    pub fn new(fetcher: &'a dyn PageFetcher, evade: &'a dyn Evade) -> Self {
        Self {
            fetcher,
            evade,
            origin: None,
        }
    }

    /// Force the `origin` parameter instead of deriving it from the facets.
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Run a search from the first page.
    ///
    /// Each call starts from a fresh accumulator, so results never carry
    /// over between searches.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidQuery`] before any request if the query
    /// can't be encoded, or [`SearchError::FetchFailed`] if a page fetch
    /// fails, in which case records gathered so far are discarded.
    pub async fn run(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<Vec<ResultRecord>> {
        let acc = self.resume(query, options, Accumulator::new()).await?;
        Ok(acc.into_items())
    }

    /// Continue a search from a previously returned accumulator.
    ///
    /// The next request starts at the number of raw hits already fetched.
    /// Keep the last good accumulator to retry after a failed fetch.
    pub async fn resume(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
        acc: Accumulator<ResultRecord>,
    ) -> Result<Accumulator<ResultRecord>> {
        // Reject bad facets before the first request
        encode(query, options.page_size, acc.next_offset())?;

        let merger = ResponseMerger::new(options.include_private_profiles);
        let origin = self.origin;

        Paginator::new(self.fetcher, self.evade)
            .with_limits(options.limits())
            .run(
                acc,
                |offset, page_size| {
                    let request = encode(query, page_size, offset)?;
                    let request = match origin {
                        Some(origin) => request.with_origin(origin),
                        None => request,
                    };
                    Ok(request.to_page_request())
                },
                |body| merge_body(&merger, body),
            )
            .await
    }

    /// Fetch the first page only and report the provider's total count.
    ///
    /// Returns `None` when the page is malformed or carries no count.
    pub async fn total_count(
        &self,
        query: &SearchQuery,
        page_size: usize,
    ) -> Result<Option<u64>> {
        let mut request = encode(query, page_size, 0)?;
        if let Some(origin) = self.origin {
            request = request.with_origin(origin);
        }

        self.evade.delay().await;
        let body = self
            .fetcher
            .fetch_page(&request.to_page_request())
            .await
            .map_err(|source| SearchError::FetchFailed { offset: 0, source })?;

        Ok(SearchPage::from_json(&body).ok().and_then(|page| page.total))
    }
}

/// Parse and merge one page; a malformed page counts as empty.
fn merge_body(merger: &ResponseMerger, body: &Value) -> PageOutcome<ResultRecord> {
    match SearchPage::from_json(body) {
        Ok(page) => PageOutcome {
            raw_count: page.raw_hit_count(),
            items: merger.merge(&page),
        },
        Err(e) => {
            tracing::warn!("Treating page as empty: {}", e);
            PageOutcome::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builders_map_to_limits() {
        let options = SearchOptions::default()
            .with_limit(25)
            .with_private_profiles(true);

        assert!(options.include_private_profiles);
        let limits = options.limits();
        assert_eq!(limits.limit, Some(25));
        assert_eq!(limits.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(limits.max_pages, DEFAULT_MAX_PAGES);

        assert!(!options.with_private_profiles(false).include_private_profiles);
    }
}
