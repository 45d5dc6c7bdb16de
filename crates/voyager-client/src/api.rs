//! High-level API facade.
//!
//! [`Voyager`] bundles a page fetcher, an evasion hook and the search
//! settings, and exposes the operations the CLI needs: people search,
//! connection listings, the connection count and the activity feeds.

use crate::error::Result;
use crate::evade::RandomDelay;
use crate::http::VoyagerClient;
use crate::updates::{feed_elements, UpdateFeed};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use voyager_core::{AppConfig, SearchConfig};
use voyager_search::{
    Accumulator, Evade, NetworkDepth, Origin, PageFetcher, PageLimits, Paginator, PeopleSearch,
    ResultRecord, SearchOptions, SearchQuery,
};

/// Page size of the canned connection-count search.
const CONNECTION_COUNT_PAGE_SIZE: usize = 10;

/// Entry point for API operations.
pub struct Voyager {
    fetcher: Arc<dyn PageFetcher>,
    evade: Arc<dyn Evade>,
    search: SearchConfig,
}

impl Voyager {
    /// Load configuration from `path`, or from the default location when
    /// `None`, then apply environment overrides.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::Config`] if the file is missing (for an
    /// explicit path), unreadable or holds out-of-range values.
    pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
        let Some(path) = path else {
            return Ok(AppConfig::load_with_env()?);
        };

        let mut config = AppConfig::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Build an authenticated facade from configuration.
    ///
    /// # Errors
    /// Returns error if the session cookies are missing or the HTTP client
    /// cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = VoyagerClient::new(&config.client)?;
        let evade = RandomDelay::from_config(&config.evasion);

        tracing::debug!(
            "Client ready for {} (delay {}..={} ms)",
            config.client.api_base_url,
            config.evasion.min_delay_ms,
            config.evasion.max_delay_ms
        );

        Ok(Self::new(Arc::new(client), Arc::new(evade), config.search.clone()))
    }

    /// Assemble a facade from explicit parts.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        evade: Arc<dyn Evade>,
        search: SearchConfig,
    ) -> Self {
        Self {
            fetcher,
            evade,
            search,
        }
    }

    /// Search options from the configured defaults.
    pub fn search_options(&self, limit: Option<usize>) -> SearchOptions {
        SearchOptions {
            limit,
            page_size: self.search.page_size,
            max_pages: self.search.max_pages,
            include_private_profiles: self.search.include_private_profiles,
        }
    }

    fn people(&self) -> PeopleSearch<'_> {
        PeopleSearch::new(self.fetcher.as_ref(), self.evade.as_ref())
    }

    /// Run a people search.
    pub async fn search_people(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<Vec<ResultRecord>> {
        Ok(self.people().run(query, options).await?)
    }

    /// First-degree connections of the member `urn_id`.
    pub async fn get_profile_connections(
        &self,
        urn_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ResultRecord>> {
        let query = SearchQuery::new()
            .with_connection_of(urn_id)
            .with_network_depth([NetworkDepth::First]);
        self.search_people(&query, &self.search_options(limit)).await
    }

    /// Number of first-degree connections of the logged-in member.
    ///
    /// `None` when the response carries no total.
    pub async fn get_current_profile_connections_count(&self) -> Result<Option<u64>> {
        let query = SearchQuery::new().with_network_depth([NetworkDepth::First]);
        Ok(self
            .people()
            .with_origin(Origin::MemberProfileCannedSearch)
            .total_count(&query, CONNECTION_COUNT_PAGE_SIZE)
            .await?)
    }

    /// Posts of a company.
    pub async fn get_company_updates(
        &self,
        public_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        self.updates(&UpdateFeed::Company(public_id.to_string()), limit)
            .await
    }

    /// Posts shared by a member.
    pub async fn get_profile_updates(
        &self,
        public_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        self.updates(&UpdateFeed::Profile(public_id.to_string()), limit)
            .await
    }

    async fn updates(&self, feed: &UpdateFeed, limit: Option<usize>) -> Result<Vec<Value>> {
        let limits = PageLimits {
            limit,
            page_size: self.search.update_page_size,
            max_pages: self.search.max_pages,
        };

        let acc = Paginator::new(self.fetcher.as_ref(), self.evade.as_ref())
            .with_limits(limits)
            .run(
                Accumulator::new(),
                |offset, count| Ok(feed.request(count, offset)),
                feed_elements,
            )
            .await?;

        Ok(acc.into_items())
    }
}
