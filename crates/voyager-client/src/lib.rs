//! Voyager Client - Authenticated access to the voyager web API.
//!
//! This crate supplies the transport side of people search: a session built
//! from browser cookies, a `reqwest` client that sends the API's required
//! headers, randomized request pacing, and a [`Voyager`] facade tying them
//! to the search engine in `voyager-search`.
//!
//! # Example
//!
//! ```rust,no_run
//! use voyager_client::Voyager;
//! use voyager_core::AppConfig;
//! use voyager_search::SearchQuery;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load_with_env()?;
//! let voyager = Voyager::from_config(&config)?;
//!
//! let query = SearchQuery::new().with_keywords("rust");
//! let people = voyager
//!     .search_people(&query, &voyager.search_options(Some(25)))
//!     .await?;
//!
//! for person in people {
//!     println!("{} {:?}", person.urn_id, person.public_id);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod error;
pub mod evade;
pub mod http;
pub mod session;
pub mod updates;

// Re-export main types
pub use api::Voyager;
pub use error::{ClientError, Result};
pub use evade::{random_user_agent, RandomDelay, DESKTOP_USER_AGENTS};
pub use http::{build_http_client, session_headers, VoyagerClient, RESTLI_PROTOCOL_VERSION};
pub use session::Session;
pub use updates::{feed_elements, UpdateFeed, UPDATES_PATH};
