//! Session cookies for the authenticated API.
//!
//! The API authenticates with two browser cookies: `li_at` and
//! `JSESSIONID`. The latter doubles as the CSRF token, sent without its
//! surrounding quotes. Both are zeroized from memory when the session is
//! dropped.

use crate::error::{ClientError, Result};
use std::fmt;
use voyager_core::ClientConfig;
use zeroize::Zeroizing;

/// Cookie pair identifying a logged-in member.
pub struct Session {
    li_at: Zeroizing<String>,
    jsessionid: Zeroizing<String>,
}

impl Session {
    /// Create a session from raw cookie values.
    ///
    /// # Errors
    /// Returns [`ClientError::Session`] if either value is blank.
    pub fn new(li_at: impl Into<String>, jsessionid: impl Into<String>) -> Result<Self> {
        let li_at = Zeroizing::new(li_at.into());
        let jsessionid = Zeroizing::new(jsessionid.into());

        if li_at.trim().is_empty() {
            return Err(ClientError::Session("li_at cookie is empty".to_string()));
        }
        if jsessionid.trim_matches('"').trim().is_empty() {
            return Err(ClientError::Session("JSESSIONID cookie is empty".to_string()));
        }

        Ok(Self { li_at, jsessionid })
    }

    /// Take the cookies from the client configuration.
    ///
    /// # Errors
    /// Returns [`ClientError::Session`] if a cookie is not configured.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let li_at = config.li_at.as_deref().ok_or_else(|| {
            ClientError::Session("li_at cookie not set (VOYAGER_LI_AT)".to_string())
        })?;
        let jsessionid = config.jsessionid.as_deref().ok_or_else(|| {
            ClientError::Session("JSESSIONID cookie not set (VOYAGER_JSESSIONID)".to_string())
        })?;

        Self::new(li_at, jsessionid)
    }

    /// CSRF token: the `JSESSIONID` value without quotes.
    pub fn csrf_token(&self) -> &str {
        self.jsessionid.trim_matches('"')
    }

    /// Value of the `cookie` request header.
    pub fn cookie_header(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "li_at={}; JSESSIONID=\"{}\"",
            self.li_at.as_str(),
            self.csrf_token()
        ))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("li_at", &"[REDACTED]")
            .field("jsessionid", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_token_strips_quotes() {
        let session = Session::new("AQEDAR", "\"ajax:123456\"").expect("session");
        assert_eq!(session.csrf_token(), "ajax:123456");
        assert_eq!(
            session.cookie_header().as_str(),
            "li_at=AQEDAR; JSESSIONID=\"ajax:123456\""
        );

        let unquoted = Session::new("AQEDAR", "ajax:123456").expect("session");
        assert_eq!(unquoted.csrf_token(), "ajax:123456");
    }

    #[test]
    fn test_blank_cookies_rejected() {
        assert!(matches!(
            Session::new("", "ajax:1"),
            Err(ClientError::Session(_))
        ));
        assert!(matches!(
            Session::new("AQEDAR", "\"\""),
            Err(ClientError::Session(_))
        ));
    }

    #[test]
    fn test_from_config_requires_cookies() {
        let mut config = ClientConfig::default();
        assert!(Session::from_config(&config).is_err());

        config.li_at = Some("AQEDAR".to_string());
        config.jsessionid = Some("ajax:1".to_string());
        assert!(Session::from_config(&config).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let session = Session::new("secret-li-at", "ajax:secret").expect("session");
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
