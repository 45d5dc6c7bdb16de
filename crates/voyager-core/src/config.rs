//! Configuration management for voyager.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Session cookies are never written to
//! disk; they only arrive through the environment.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest page the people search endpoint will serve.
pub const MAX_SEARCH_PAGE_SIZE: usize = 49;

/// Largest page the feed updates endpoint will serve.
pub const MAX_UPDATE_PAGE_SIZE: usize = 100;

/// Main application configuration.
///
/// This is loaded from `~/.config/voyager/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client and session settings
    pub client: ClientConfig,
    /// Search pagination settings
    pub search: SearchConfig,
    /// Request pacing settings
    pub evasion: EvasionConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `VOYAGER_LI_AT`: `li_at` session cookie
    /// - `VOYAGER_JSESSIONID`: `JSESSIONID` cookie (doubles as the CSRF token)
    /// - `VOYAGER_PAGE_SIZE`: Override the search page size
    /// - `VOYAGER_MAX_DELAY_MS`: Override the upper bound of the request delay
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    ///
    /// Values that fail to parse are ignored and the configured value kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("VOYAGER_LI_AT") {
            self.client.li_at = Some(val);
            tracing::debug!("Override client.li_at from env");
        }

        if let Some(val) = lookup("VOYAGER_JSESSIONID") {
            self.client.jsessionid = Some(val);
            tracing::debug!("Override client.jsessionid from env");
        }

        if let Some(val) = lookup("VOYAGER_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                self.search.page_size = size;
                tracing::debug!("Override search.page_size from env: {}", size);
            }
        }

        if let Some(val) = lookup("VOYAGER_MAX_DELAY_MS") {
            if let Ok(ms) = val.parse() {
                self.evasion.max_delay_ms = ms;
                tracing::debug!("Override evasion.max_delay_ms from env: {}", ms);
            }
        }
    }

    /// Check value ranges that the search endpoints enforce.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.page_size == 0 || self.search.page_size > MAX_SEARCH_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "search.page_size".to_string(),
                reason: format!("must be between 1 and {MAX_SEARCH_PAGE_SIZE}"),
            });
        }

        if self.search.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_pages".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.search.update_page_size == 0 || self.search.update_page_size > MAX_UPDATE_PAGE_SIZE
        {
            return Err(ConfigError::InvalidValue {
                field: "search.update_page_size".to_string(),
                reason: format!("must be between 1 and {MAX_UPDATE_PAGE_SIZE}"),
            });
        }

        if self.evasion.min_delay_ms > self.evasion.max_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "evasion.min_delay_ms".to_string(),
                reason: format!(
                    "{} exceeds max_delay_ms {}",
                    self.evasion.min_delay_ms, self.evasion.max_delay_ms
                ),
            });
        }

        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`.
    ///
    /// Creates the parent directory if it doesn't exist. Session cookies are
    /// never written.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/voyager/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "voyager", "voyager").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// HTTP client and session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every relative API path is appended to
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Fixed user agent; a random desktop agent is picked when unset
    pub user_agent: Option<String>,
    /// `li_at` session cookie (environment only, never serialized)
    #[serde(skip)]
    pub li_at: Option<String>,
    /// `JSESSIONID` cookie (environment only, never serialized)
    #[serde(skip)]
    pub jsessionid: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.linkedin.com/voyager/api".to_string(),
            timeout_secs: 30,
            user_agent: None,
            li_at: None,
            jsessionid: None,
        }
    }
}

/// Search pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hits requested per search page
    pub page_size: usize,
    /// Ceiling on repeated page requests for a limited search
    pub max_pages: usize,
    /// Keep members without a public identifier in results
    pub include_private_profiles: bool,
    /// Elements requested per feed updates page
    pub update_page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_SEARCH_PAGE_SIZE,
            max_pages: 200,
            include_private_profiles: false,
            update_page_size: MAX_UPDATE_PAGE_SIZE,
        }
    }
}

/// Request pacing settings.
///
/// Before every request the client sleeps for a uniformly random duration
/// in `min_delay_ms..=max_delay_ms`. Both zero disables the delay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Lower bound of the delay in milliseconds
    pub min_delay_ms: u64,
    /// Upper bound of the delay in milliseconds
    pub max_delay_ms: u64,
}
