//! Shared types used across the voyager crates.

use crate::error::{Result, VoyagerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Segment of a `urn:li:<type>:<id>` urn holding the compact id.
const URN_ID_SEGMENT: usize = 3;

/// Extract the compact id from a fully-qualified entity urn.
///
/// Splits on `:` and takes the fourth segment, so
/// `urn:li:fs_miniProfile:ACoAAB1` yields `ACoAAB1`. Returns `None` when
/// the urn has fewer segments.
#[must_use]
pub fn get_id_from_urn(urn: &str) -> Option<&str> {
    urn.split(':').nth(URN_ID_SEGMENT)
}

/// Newtype for provider entity urns with validation.
///
/// Urns must look like `urn:li:<type>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Urn(String);

impl Urn {
    /// Create a new `Urn` from a string.
    ///
    /// # Errors
    /// Returns error if the string doesn't have the `urn:li:<type>:<id>` shape.
    pub fn new(urn: impl Into<String>) -> Result<Self> {
        let urn = urn.into();
        Self::validate(&urn)?;
        Ok(Self(urn))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Entity type segment, e.g. `fs_miniProfile`.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        self.0.split(':').nth(2).unwrap_or_default()
    }

    /// Compact id segment, e.g. `ACoAAB1`.
    #[must_use]
    pub fn id(&self) -> &str {
        get_id_from_urn(&self.0).unwrap_or_default()
    }

    fn validate(urn: &str) -> Result<()> {
        static URN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URN_REGEX
            .get_or_init(|| Regex::new(r"^urn:li:[A-Za-z_]+:[^:\s]+").expect("valid regex"));

        if regex.is_match(urn) {
            Ok(())
        } else {
            Err(VoyagerError::Validation(format!(
                "invalid urn: expected urn:li:<type>:<id>, got '{urn}'"
            )))
        }
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
