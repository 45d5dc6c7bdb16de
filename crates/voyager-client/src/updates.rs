//! Company and member activity feeds.
//!
//! Both feeds live at `/feed/updates` and page with `count`/`start` the same
//! way people search does, so they run through the same
//! [`voyager_search::Paginator`]. Elements are passed through as raw JSON.

use serde_json::Value;
use voyager_search::{PageOutcome, PageRequest};

/// Path of the updates feed.
pub const UPDATES_PATH: &str = "/feed/updates";

/// Which feed to page through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateFeed {
    /// Posts of a company, by universal name or urn id
    Company(String),
    /// Posts shared by a member, by public id or urn id
    Profile(String),
}

impl UpdateFeed {
    /// Request for `count` elements starting at `start`.
    pub fn request(&self, count: usize, start: usize) -> PageRequest {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        match self {
            Self::Company(id) => {
                query.append_pair("companyUniversalName", id);
                query.append_pair("q", "companyFeedByUniversalName");
            }
            Self::Profile(id) => {
                query.append_pair("profileId", id);
                query.append_pair("q", "memberShareFeed");
            }
        }
        query.append_pair("moduleKey", "member-share");
        query.append_pair("count", &count.to_string());
        query.append_pair("start", &start.to_string());

        PageRequest::new(format!("{UPDATES_PATH}?{}", query.finish()))
    }
}

/// Elements of one feed page. A body without an `elements` list counts as
/// an empty page.
pub fn feed_elements(body: &Value) -> PageOutcome<Value> {
    let Some(elements) = body.get("elements").and_then(Value::as_array) else {
        tracing::warn!("Feed page has no elements list, treating as empty");
        return PageOutcome::empty();
    };

    PageOutcome {
        raw_count: elements.len(),
        items: elements.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_feed_request() {
        let request = UpdateFeed::Company("acme corp".to_string()).request(100, 200);
        assert_eq!(
            request.path,
            "/feed/updates?companyUniversalName=acme+corp&q=companyFeedByUniversalName\
             &moduleKey=member-share&count=100&start=200"
        );
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_profile_feed_request() {
        let request = UpdateFeed::Profile("ada-l".to_string()).request(100, 0);
        assert_eq!(
            request.path,
            "/feed/updates?profileId=ada-l&q=memberShareFeed&moduleKey=member-share&count=100&start=0"
        );
    }

    #[test]
    fn test_feed_elements() {
        let page = feed_elements(&json!({ "elements": [{ "urn": "a" }, { "urn": "b" }] }));
        assert_eq!(page.raw_count, 2);
        assert_eq!(page.items[1]["urn"], "b");

        let page = feed_elements(&json!({ "paging": {} }));
        assert_eq!(page.raw_count, 0);
        assert!(page.items.is_empty());
    }
}
