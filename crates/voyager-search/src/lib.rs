//! Voyager Search - Paginated, facet-composing people search.
//!
//! This crate turns a set of optional search facets into the provider's
//! filter-list encoding, pages through the search endpoint against a moving
//! offset, and merges each normalized response into flat person records.
//!
//! # Features
//!
//! - Deterministic facet encoding with up-front validation
//! - Sequential pagination with limit, request-ceiling and exhaustion stops
//! - Resumable accumulators that continue at the right provider offset
//! - Defensive parsing of hit lists and `included` detail entities
//! - Ordered-rule splitting of occupation headlines
//!
//! Transport and pacing are injected through the [`PageFetcher`] and
//! [`Evade`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use voyager_search::{NoDelay, PeopleSearch, SearchOptions, SearchQuery};
//!
//! let query = SearchQuery::new()
//!     .with_keywords("rust")
//!     .with_regions(["de:0"]);
//!
//! let records = PeopleSearch::new(&client, &NoDelay)
//!     .run(&query, &SearchOptions::default().with_limit(100))
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod fetch;
#[allow(missing_docs)]
pub mod merger;
pub mod occupation;
#[allow(missing_docs)]
pub mod page;
#[allow(missing_docs)]
pub mod paginator;
pub mod people;
#[allow(missing_docs)]
pub mod query;

// Re-export commonly used types
pub use error::{FetchError, Result, SearchError};
pub use fetch::{Evade, NoDelay, PageFetcher, PageRequest, NORMALIZED_JSON};
pub use merger::{ResponseMerger, ResultRecord};
pub use occupation::{split_occupation, SplitRule, OCCUPATION_RULES};
pub use page::{Detail, Hit, SearchPage};
pub use paginator::{
    Accumulator, PageLimits, PageOutcome, Paginator, StopReason, DEFAULT_MAX_PAGES,
    DEFAULT_PAGE_SIZE,
};
pub use people::{PeopleSearch, SearchOptions};
pub use query::{encode, NetworkDepth, Origin, SearchQuery, SearchRequest};
