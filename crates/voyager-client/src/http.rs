//! Authenticated HTTP transport.

use crate::error::{ClientError, Result};
use crate::evade::random_user_agent;
use crate::session::Session;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, COOKIE, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use voyager_core::ClientConfig;
use voyager_search::{FetchError, PageFetcher, PageRequest};

/// Rest.li protocol version the API expects.
pub const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Build an HTTP client with the given timeout and default headers.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: u64, headers: HeaderMap) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|e| ClientError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Headers sent with every request of `session`.
///
/// The cookie header is marked sensitive so it never shows up in debug
/// output.
pub fn session_headers(session: &Session, user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut cookie = header_value(session.cookie_header().as_str())?;
    cookie.set_sensitive(true);
    headers.insert(COOKIE, cookie);

    let mut csrf = header_value(session.csrf_token())?;
    csrf.set_sensitive(true);
    headers.insert(HeaderName::from_static("csrf-token"), csrf);

    headers.insert(
        HeaderName::from_static("x-restli-protocol-version"),
        HeaderValue::from_static(RESTLI_PROTOCOL_VERSION),
    );
    headers.insert(
        HeaderName::from_static("x-li-lang"),
        HeaderValue::from_static("en_US"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(user_agent)?);

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Session(format!("value not usable as a header: {e}")))
}

/// GET-only client for the voyager API.
pub struct VoyagerClient {
    client: Client,
    base_url: String,
}

impl VoyagerClient {
    /// Create a client from configuration, taking the session cookies from
    /// it.
    ///
    /// # Errors
    /// Returns error if the cookies are missing or the HTTP client cannot be
    /// created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let session = Session::from_config(config)?;
        Self::with_session(config, &session)
    }

    /// Create a client for an explicit session.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_session(config: &ClientConfig, session: &Session) -> Result<Self> {
        // A closure keeps the borrow of `config` from being forced to 'static
        #[allow(clippy::redundant_closure)]
        let user_agent = config
            .user_agent
            .as_deref()
            .unwrap_or_else(|| random_user_agent());
        let headers = session_headers(session, user_agent)?;
        let client = build_http_client(config.timeout_secs, headers)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of a relative API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// # Errors
    /// Returns [`ClientError::Api`] on a non-success status,
    /// [`ClientError::Network`] on transport failure and
    /// [`ClientError::Parse`] if the body is not JSON.
    pub async fn get_json(&self, request: &PageRequest) -> Result<Value> {
        let mut builder = self.client.get(self.url(&request.path));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("GET {} returned {}", request.path, status);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for VoyagerClient {
    async fn fetch_page(&self, request: &PageRequest) -> std::result::Result<Value, FetchError> {
        self.get_json(request)
            .await
            .map_err(|e| e.into_fetch_error(&request.path))
    }
}
