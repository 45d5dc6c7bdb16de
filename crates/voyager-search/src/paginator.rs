//! Sequential offset pagination.
//!
//! This module provides the [`Paginator`], which drives repeated page
//! requests against a moving `start` offset and accumulates what each page
//! yields until a stop condition holds. Pages are fetched strictly one after
//! another: the offset of a request depends on the hit count of the one
//! before it.

use crate::error::{Result, SearchError};
use crate::fetch::{Evade, PageFetcher, PageRequest};
use serde_json::Value;

/// Largest page the people search endpoint serves.
pub const DEFAULT_PAGE_SIZE: usize = 49;

/// Ceiling on repeated requests for a limited search.
pub const DEFAULT_MAX_PAGES: usize = 200;

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The accumulator holds `limit` items
    LimitReached,
    /// The repeated-request ceiling was hit before the limit
    PageCeiling,
    /// The provider returned a page with no hits
    Exhausted,
}

/// Limits governing one pagination run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Maximum number of accumulated items, unbounded when `None`
    pub limit: Option<usize>,
    /// Items requested per page
    pub page_size: usize,
    /// Ceiling on page requests; only enforced when `limit` is set
    pub max_pages: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            limit: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PageLimits {
    fn limit_reached(&self, len: usize) -> bool {
        self.limit.is_some_and(|limit| len >= limit)
    }

    /// Repeated-request ceiling, counted over the accumulator's whole
    /// lifetime. Only applies to limited runs.
    fn ceiling_reached<T>(&self, acc: &Accumulator<T>) -> bool {
        if self.limit.is_none() {
            return false;
        }
        let by_results = acc.len() / self.page_size.max(1) >= self.max_pages;
        let by_requests = acc.pages_fetched >= self.max_pages;
        by_results || by_requests
    }

    /// Stop condition checked before the first request and after each page.
    fn stop_reason<T>(&self, acc: &Accumulator<T>, page_hits: usize) -> Option<StopReason> {
        if self.limit_reached(acc.len()) {
            return Some(StopReason::LimitReached);
        }
        if self.ceiling_reached(acc) {
            return Some(StopReason::PageCeiling);
        }
        if page_hits == 0 {
            return Some(StopReason::Exhausted);
        }
        None
    }
}

/// Items accumulated across pages plus the offset bookkeeping needed to
/// continue.
///
/// The next offset is the number of raw hits fetched so far, which can be
/// larger than the number of items kept (hits get filtered and the list is
/// truncated to the limit).
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator<T> {
    items: Vec<T>,
    raw_fetched: usize,
    pages_fetched: usize,
    stop_reason: Option<StopReason>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            raw_fetched: 0,
            pages_fetched: 0,
            stop_reason: None,
        }
    }
}

impl<T> Accumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offset of the next page request.
    pub fn next_offset(&self) -> usize {
        self.raw_fetched
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Why the last run stopped, `None` before any run finished.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }
}

/// What one page contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome<T> {
    /// Raw hits on the page, before resolution or filtering
    pub raw_count: usize,
    /// Items kept from the page, in page order
    pub items: Vec<T>,
}

impl<T> PageOutcome<T> {
    pub fn empty() -> Self {
        Self {
            raw_count: 0,
            items: Vec::new(),
        }
    }
}

/// Drives page requests through a fetcher, pacing each one with an
/// evasion hook.
pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    evade: &'a dyn Evade,
    limits: PageLimits,
}

impl<'a> Paginator<'a> {
    #[must_use]
    pub fn new(fetcher: &'a dyn PageFetcher, evade: &'a dyn Evade) -> Self {
        Self {
            fetcher,
            evade,
            limits: PageLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// Fetch pages until a stop condition holds.
    ///
    /// `request_for(offset, page_size)` builds each request and
    /// `extract(body)` turns a response body into the page's raw hit count
    /// and kept items. `acc` may be a fresh accumulator or one returned by an
    /// earlier run, in which case fetching resumes at its next offset.
    ///
    /// # Errors
    /// Errors from `request_for` are returned before the request is sent. A
    /// fetch failure is returned as [`SearchError::FetchFailed`] and the
    /// accumulator is dropped.
    pub async fn run<T, R, X>(
        &self,
        mut acc: Accumulator<T>,
        mut request_for: R,
        mut extract: X,
    ) -> Result<Accumulator<T>>
    where
        R: FnMut(usize, usize) -> Result<PageRequest>,
        X: FnMut(&Value) -> PageOutcome<T>,
    {
        let limits = self.limits;

        if limits.limit_reached(acc.len()) {
            acc.stop_reason = Some(StopReason::LimitReached);
            return Ok(acc);
        }
        if limits.ceiling_reached(&acc) {
            tracing::debug!(
                "Request ceiling already reached after {} pages",
                acc.pages_fetched
            );
            acc.stop_reason = Some(StopReason::PageCeiling);
            return Ok(acc);
        }

        loop {
            let offset = acc.raw_fetched;
            let request = request_for(offset, limits.page_size)?;

            self.evade.delay().await;
            tracing::debug!("Fetching page at offset {}: {}", offset, request.path);

            let body = self
                .fetcher
                .fetch_page(&request)
                .await
                .map_err(|source| SearchError::FetchFailed { offset, source })?;

            let page = extract(&body);
            acc.pages_fetched += 1;
            acc.raw_fetched += page.raw_count;
            acc.items.extend(page.items);
            if let Some(limit) = limits.limit {
                acc.items.truncate(limit);
            }

            if let Some(reason) = limits.stop_reason(&acc, page.raw_count) {
                tracing::info!(
                    "Pagination stopped ({:?}) after {} pages with {} results",
                    reason,
                    acc.pages_fetched,
                    acc.len()
                );
                acc.stop_reason = Some(reason);
                return Ok(acc);
            }

            tracing::debug!("Results grew to {}", acc.len());
        }
    }
}
