//! Typed view over one normalized search response.
//!
//! The provider's schema drifts, so every nested field is read through an
//! accessor that returns `Option` (or an empty string where that is the
//! documented fallback) instead of failing the page.

use crate::error::{Result, SearchError};
use serde_json::Value;
use std::collections::HashMap;

/// A ranked search hit pointing at a detail entity in `included`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Urn of the entity this hit refers to, `None` when the hit has none
    pub target_urn: Option<String>,
    /// Display subline (location text for people)
    pub subline: Option<String>,
}

impl Hit {
    fn from_json(value: &Value) -> Self {
        let target_urn = str_field(value, "targetUrn")
            .or_else(|| str_field(value, "*targetUrn"))
            .or_else(|| str_field(value, "entityUrn"))
            .map(ToString::to_string);
        let subline = value
            .get("subline")
            .and_then(|s| str_field(s, "text"))
            .map(ToString::to_string);

        Self {
            target_urn,
            subline,
        }
    }
}

/// A detail entity from the `included` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    entity_urn: String,
    raw: Value,
}

impl Detail {
    /// Wrap a raw entity; `None` when it carries no `entityUrn`.
    pub fn from_json(raw: Value) -> Option<Self> {
        let entity_urn = str_field(&raw, "entityUrn")?.to_string();
        Some(Self { entity_urn, raw })
    }

    pub fn entity_urn(&self) -> &str {
        &self.entity_urn
    }

    /// Public profile slug. Absent for private members.
    pub fn public_identifier(&self) -> Option<&str> {
        str_field(&self.raw, "publicIdentifier").filter(|s| !s.is_empty())
    }

    pub fn first_name(&self) -> Option<&str> {
        str_field(&self.raw, "firstName")
    }

    pub fn last_name(&self) -> Option<&str> {
        str_field(&self.raw, "lastName")
    }

    /// Headline text. `None` when missing or empty.
    pub fn occupation(&self) -> Option<&str> {
        str_field(&self.raw, "occupation").filter(|s| !s.is_empty())
    }

    /// Picture URL built from `rootUrl` and the first artifact's path
    /// segment. Empty string when any piece is missing.
    ///
    /// Accepts both the flat `picture` object and the one wrapped in
    /// `com.linkedin.common.VectorImage`.
    pub fn picture_url(&self) -> String {
        let Some(picture) = self.raw.get("picture") else {
            return String::new();
        };
        let image = picture
            .get("com.linkedin.common.VectorImage")
            .unwrap_or(picture);

        let root = str_field(image, "rootUrl");
        let segment = image
            .get("artifacts")
            .and_then(Value::as_array)
            .and_then(|artifacts| artifacts.first())
            .and_then(|artifact| str_field(artifact, "fileIdentifyingUrlPathSegment"));

        match (root, segment) {
            (Some(root), Some(segment)) => format!("{root}{segment}"),
            _ => String::new(),
        }
    }
}

/// One parsed search response.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Hits of every cluster, in page order
    pub hits: Vec<Hit>,
    /// Detail entities keyed by entity urn
    pub included: HashMap<String, Detail>,
    /// Provider-reported total result count
    pub total: Option<u64>,
}

impl SearchPage {
    /// Parse a normalized response body.
    ///
    /// # Errors
    /// Returns [`SearchError::MalformedPage`] when `data` or `data.elements`
    /// is missing. Everything below that level degrades instead of failing.
    pub fn from_json(body: &Value) -> Result<Self> {
        let data = body
            .get("data")
            .filter(|d| d.is_object())
            .ok_or_else(|| SearchError::MalformedPage("missing `data` section".to_string()))?;
        let clusters = data
            .get("elements")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SearchError::MalformedPage("missing `data.elements` section".to_string())
            })?;

        let hits = clusters
            .iter()
            .filter_map(|cluster| cluster.get("elements").and_then(Value::as_array))
            .flatten()
            .map(Hit::from_json)
            .collect();

        let included = body
            .get("included")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .cloned()
                    .filter_map(Detail::from_json)
                    .map(|detail| (detail.entity_urn.clone(), detail))
                    .collect()
            })
            .unwrap_or_default();

        let total = data
            .get("metadata")
            .and_then(|m| m.get("totalResultCount"))
            .and_then(Value::as_u64)
            .or_else(|| {
                data.get("paging")
                    .and_then(|p| p.get("total"))
                    .and_then(Value::as_u64)
            });

        Ok(Self {
            hits,
            included,
            total,
        })
    }

    /// Number of raw hits, before any resolution or filtering.
    pub fn raw_hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn detail(&self, urn: &str) -> Option<&Detail> {
        self.included.get(urn)
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> Value {
        json!({
            "data": {
                "metadata": { "totalResultCount": 1200 },
                "paging": { "total": 1000, "start": 0, "count": 49 },
                "elements": [
                    { "elements": [
                        { "targetUrn": "urn:li:fs_miniProfile:A1", "subline": { "text": "Berlin" } },
                        { "targetUrn": "urn:li:fs_miniProfile:B2" }
                    ]},
                    { "elements": [
                        { "targetUrn": "urn:li:fs_miniProfile:C3", "subline": { "text": "Paris" } }
                    ]},
                    { "type": "SEARCH_FEATURES" }
                ]
            },
            "included": [
                {
                    "entityUrn": "urn:li:fs_miniProfile:A1",
                    "$type": "com.linkedin.voyager.identity.shared.MiniProfile",
                    "publicIdentifier": "ada-l",
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "occupation": "Engineer at Acme",
                    "picture": {
                        "rootUrl": "https://media.example/",
                        "artifacts": [{ "fileIdentifyingUrlPathSegment": "100x100.jpg" }]
                    }
                },
                { "$type": "com.linkedin.voyager.search.SearchCluster" }
            ]
        })
    }

    #[test]
    fn test_parse_flattens_clusters() {
        let page = SearchPage::from_json(&sample_body()).expect("parse page");
        assert_eq!(page.raw_hit_count(), 3);
        assert_eq!(page.hits[0].target_urn.as_deref(), Some("urn:li:fs_miniProfile:A1"));
        assert_eq!(page.hits[0].subline.as_deref(), Some("Berlin"));
        assert_eq!(page.hits[1].subline, None);
        assert_eq!(page.hits[2].subline.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_parse_included_skips_entities_without_urn() {
        let page = SearchPage::from_json(&sample_body()).expect("parse page");
        assert_eq!(page.included.len(), 1);
        let detail = page.detail("urn:li:fs_miniProfile:A1").expect("detail present");
        assert_eq!(detail.public_identifier(), Some("ada-l"));
        assert_eq!(detail.first_name(), Some("Ada"));
        assert_eq!(detail.occupation(), Some("Engineer at Acme"));
        assert_eq!(detail.picture_url(), "https://media.example/100x100.jpg");
    }

    #[test]
    fn test_total_prefers_metadata() {
        let page = SearchPage::from_json(&sample_body()).expect("parse page");
        assert_eq!(page.total, Some(1200));

        let body = json!({ "data": { "paging": { "total": 7 }, "elements": [] } });
        let page = SearchPage::from_json(&body).expect("parse page");
        assert_eq!(page.total, Some(7));
        assert_eq!(page.raw_hit_count(), 0);
    }

    #[test]
    fn test_malformed_pages() {
        for body in [
            json!({}),
            json!({ "data": null }),
            json!({ "data": { "paging": {} } }),
            json!({ "data": { "elements": {} } }),
        ] {
            assert!(matches!(
                SearchPage::from_json(&body),
                Err(SearchError::MalformedPage(_))
            ));
        }
    }

    #[test]
    fn test_picture_url_fallbacks() {
        let detail = |picture: Value| {
            Detail::from_json(json!({ "entityUrn": "urn:li:fs_miniProfile:X", "picture": picture }))
                .expect("detail")
        };

        assert_eq!(detail(Value::Null).picture_url(), "");
        assert_eq!(detail(json!({ "rootUrl": "https://m/" })).picture_url(), "");
        assert_eq!(
            detail(json!({ "rootUrl": "https://m/", "artifacts": [] })).picture_url(),
            ""
        );
        assert_eq!(
            detail(json!({
                "com.linkedin.common.VectorImage": {
                    "rootUrl": "https://m/",
                    "artifacts": [{ "fileIdentifyingUrlPathSegment": "a.jpg" }]
                }
            }))
            .picture_url(),
            "https://m/a.jpg"
        );

        let bare = Detail::from_json(json!({ "entityUrn": "urn:li:fs_miniProfile:Y" }))
            .expect("detail");
        assert_eq!(bare.picture_url(), "");
    }

    #[test]
    fn test_private_member_has_no_public_identifier() {
        let detail = Detail::from_json(json!({
            "entityUrn": "urn:li:fs_miniProfile:P",
            "publicIdentifier": "",
            "firstName": "LinkedIn",
            "lastName": "Member"
        }))
        .expect("detail");
        assert_eq!(detail.public_identifier(), None);
    }
}
