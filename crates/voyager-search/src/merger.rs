use crate::occupation::split_occupation;
use crate::page::{Detail, SearchPage};
use serde::{Deserialize, Serialize};
use voyager_core::get_id_from_urn;

/// Base of public profile permalinks.
pub const PROFILE_BASE_URL: &str = "https://www.linkedin.com/in/";

/// A person resolved from a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub urn_id: String,
    /// `None` for private members
    pub public_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: String,
    pub company: String,
    /// Empty when the member has no usable picture
    pub picture_url: String,
    pub location: Option<String>,
    /// Permalink, `None` without a public id
    pub navigation_url: Option<String>,
}

pub struct ResponseMerger {
    include_private: bool,
}

impl ResponseMerger {
    pub fn new(include_private: bool) -> Self {
        Self { include_private }
    }

    /// Resolve the hits of `page` against its `included` details, in hit
    /// order.
    ///
    /// Hits without a matching detail are dropped, as are private members
    /// unless they were asked for. Each record's location is the subline of
    /// the hit it was resolved from.
    pub fn merge(&self, page: &SearchPage) -> Vec<ResultRecord> {
        let mut records = Vec::with_capacity(page.hits.len());

        for (index, hit) in page.hits.iter().enumerate() {
            let Some(urn) = hit.target_urn.as_deref() else {
                tracing::debug!("Hit {} has no target urn, skipping", index);
                continue;
            };

            let Some(detail) = page.detail(urn) else {
                tracing::warn!(
                    "Hit {} references {} which is not included, skipping",
                    index,
                    urn
                );
                continue;
            };

            if detail.public_identifier().is_none() && !self.include_private {
                continue;
            }

            records.push(Self::to_record(detail, hit.subline.clone()));
        }

        records
    }

    fn to_record(detail: &Detail, location: Option<String>) -> ResultRecord {
        let (position, company) = detail
            .occupation()
            .map(split_occupation)
            .unwrap_or_default();
        let public_id = detail.public_identifier().map(ToString::to_string);
        let navigation_url = public_id.as_ref().map(|id| format!("{PROFILE_BASE_URL}{id}"));

        ResultRecord {
            urn_id: get_id_from_urn(detail.entity_urn())
                .unwrap_or_default()
                .to_string(),
            public_id,
            first_name: detail.first_name().map(ToString::to_string),
            last_name: detail.last_name().map(ToString::to_string),
            position,
            company,
            picture_url: detail.picture_url(),
            location,
            navigation_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn page(body: &Value) -> SearchPage {
        SearchPage::from_json(body).expect("parse page")
    }

    fn profile(id: &str, public_id: Option<&str>, occupation: &str) -> Value {
        let mut entity = json!({
            "entityUrn": format!("urn:li:fs_miniProfile:{id}"),
            "firstName": format!("First{id}"),
            "lastName": format!("Last{id}"),
            "occupation": occupation,
        });
        if let Some(public_id) = public_id {
            entity["publicIdentifier"] = json!(public_id);
        }
        entity
    }

    fn hit(id: &str, location: &str) -> Value {
        json!({
            "targetUrn": format!("urn:li:fs_miniProfile:{id}"),
            "subline": { "text": location }
        })
    }

    #[test]
    fn test_merge_resolves_hits_in_order() {
        let body = json!({
            "data": { "elements": [{ "elements": [hit("B", "Oslo"), hit("A", "Rome")] }] },
            "included": [
                profile("A", Some("alice"), "Engineer \u{2013} Acme"),
                profile("B", Some("bob"), "Designer"),
            ]
        });

        let records = ResponseMerger::new(false).merge(&page(&body));
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].urn_id, "B");
        assert_eq!(records[0].public_id.as_deref(), Some("bob"));
        assert_eq!(records[0].position, "Designer");
        assert_eq!(records[0].company, "");
        assert_eq!(records[0].location.as_deref(), Some("Oslo"));

        assert_eq!(records[1].urn_id, "A");
        assert_eq!(records[1].first_name.as_deref(), Some("FirstA"));
        assert_eq!(records[1].position, "Engineer");
        assert_eq!(records[1].company, " Acme");
        assert_eq!(records[1].location.as_deref(), Some("Rome"));
        assert_eq!(
            records[1].navigation_url.as_deref(),
            Some("https://www.linkedin.com/in/alice")
        );
        assert_eq!(records[1].picture_url, "");
    }

    #[test]
    fn test_merge_drops_unresolved_hit() {
        let body = json!({
            "data": { "elements": [{ "elements": [hit("A", "Rome"), hit("GONE", "Nowhere")] }] },
            "included": [profile("A", Some("alice"), "Engineer")]
        });

        let records = ResponseMerger::new(true).merge(&page(&body));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].urn_id, "A");
    }

    #[test]
    fn test_merge_skips_hit_without_target() {
        let body = json!({
            "data": { "elements": [{ "elements": [
                { "subline": { "text": "Nowhere" } },
                hit("A", "Rome"),
            ] }] },
            "included": [profile("A", Some("alice"), "Engineer")]
        });

        let page = page(&body);
        assert_eq!(page.raw_hit_count(), 2);

        let records = ResponseMerger::new(true).merge(&page);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].urn_id, "A");
        assert_eq!(records[0].location.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_merge_private_profiles_opt_in() {
        let body = json!({
            "data": { "elements": [{ "elements": [hit("P", "Lima"), hit("A", "Rome")] }] },
            "included": [
                profile("P", None, "Consultant"),
                profile("A", Some("alice"), "Engineer"),
            ]
        });

        let public_only = ResponseMerger::new(false).merge(&page(&body));
        assert_eq!(public_only.len(), 1);
        assert_eq!(public_only[0].urn_id, "A");

        let with_private = ResponseMerger::new(true).merge(&page(&body));
        assert_eq!(with_private.len(), 2);
        assert_eq!(with_private[0].public_id, None);
        assert_eq!(with_private[0].navigation_url, None);
        assert_eq!(with_private[0].location.as_deref(), Some("Lima"));
    }

    #[test]
    fn test_merge_missing_fields_degrade() {
        let body = json!({
            "data": { "elements": [{ "elements": [{ "targetUrn": "urn:li:fs_miniProfile:Z" }] }] },
            "included": [{ "entityUrn": "urn:li:fs_miniProfile:Z", "publicIdentifier": "zed" }]
        });

        let records = ResponseMerger::new(false).merge(&page(&body));
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.first_name, None);
        assert_eq!(record.position, "");
        assert_eq!(record.company, "");
        assert_eq!(record.picture_url, "");
        assert_eq!(record.location, None);
    }

    #[test]
    fn test_merge_empty_page() {
        let body = json!({ "data": { "elements": [] } });
        assert!(ResponseMerger::new(false).merge(&page(&body)).is_empty());
    }
}
