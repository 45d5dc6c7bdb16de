//! Voyager Core - Foundation crate for the voyager search client.
//!
//! This crate provides shared types, error handling and configuration
//! management that the search engine, HTTP client and CLI depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Entity urn newtype and urn id extraction
//!
//! # Example
//!
//! ```rust
//! use voyager_core::{get_id_from_urn, AppConfig};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.search.page_size, 49);
//!
//! assert_eq!(get_id_from_urn("urn:li:fs_miniProfile:ACoAAB1"), Some("ACoAAB1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, ClientConfig, EvasionConfig, SearchConfig};
pub use error::{ConfigError, ConfigResult, Result, VoyagerError};
pub use types::{get_id_from_urn, Urn};
