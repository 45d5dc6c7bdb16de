use crate::error::{Result, SearchError};
use crate::fetch::PageRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Endpoint serving blended people search.
pub const SEARCH_PATH: &str = "/search/blended";

const QUERY_CONTEXT: &str = "List(spellCorrectionEnabled->true,relatedSearchesEnabled->true)";

/// Characters that structure the filter list and can't appear in a value.
const RESERVED: &[char] = &['(', ')', ',', '|'];

/// Connection degree relative to the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NetworkDepth {
    First,
    Second,
    Third,
}

impl NetworkDepth {
    pub fn code(self) -> &'static str {
        match self {
            Self::First => "F",
            Self::Second => "S",
            Self::Third => "O",
        }
    }
}

impl FromStr for NetworkDepth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "F" | "f" | "1" => Ok(Self::First),
            "S" | "s" | "2" => Ok(Self::Second),
            "O" | "o" | "3" => Ok(Self::Third),
            other => Err(SearchError::InvalidQuery {
                field: "network_depth",
                reason: format!("expected F, S or O, got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for NetworkDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Value of the `origin` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    ClusterExpansion,
    FacetedSearch,
    MemberProfileCannedSearch,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClusterExpansion => "CLUSTER_EXPANSION",
            Self::FacetedSearch => "FACETED_SEARCH",
            Self::MemberProfileCannedSearch => "MEMBER_PROFILE_CANNED_SEARCH",
        }
    }
}

/// Facets of a people search. Every field is optional; empty lists and
/// empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub current_companies: Vec<String>,
    pub past_companies: Vec<String>,
    pub schools: Vec<String>,
    pub regions: Vec<String>,
    pub industries: Vec<String>,
    pub profile_languages: Vec<String>,
    pub network_depth: BTreeSet<NetworkDepth>,
    pub connection_of: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub school: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    #[must_use]
    pub fn with_current_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current_companies = companies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_past_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.past_companies = companies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_schools<I, S>(mut self, schools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schools = schools.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_profile_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profile_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_network_depth(mut self, depths: impl IntoIterator<Item = NetworkDepth>) -> Self {
        self.network_depth = depths.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_connection_of(mut self, urn_id: impl Into<String>) -> Self {
        self.connection_of = Some(urn_id.into());
        self
    }

    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    /// True when any facet other than the keyword is set.
    pub fn has_facets(&self) -> bool {
        !self.current_companies.is_empty()
            || !self.past_companies.is_empty()
            || !self.schools.is_empty()
            || !self.regions.is_empty()
            || !self.industries.is_empty()
            || !self.profile_languages.is_empty()
            || !self.network_depth.is_empty()
            || is_set(self.connection_of.as_deref())
            || is_set(self.first_name.as_deref())
            || is_set(self.last_name.as_deref())
            || is_set(self.title.as_deref())
            || is_set(self.company.as_deref())
            || is_set(self.school.as_deref())
    }
}

/// An encoded search page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub filters: String,
    pub keywords: Option<String>,
    pub origin: Origin,
    pub count: usize,
    pub start: usize,
}

impl SearchRequest {
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Render the relative request path with its query string.
    pub fn path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("count", &self.count.to_string());
        query.append_pair("filters", &self.filters);
        if let Some(keywords) = &self.keywords {
            query.append_pair("keywords", keywords);
        }
        query.append_pair("origin", self.origin.as_str());
        query.append_pair("q", "all");
        query.append_pair("queryContext", QUERY_CONTEXT);
        query.append_pair("start", &self.start.to_string());

        format!("{SEARCH_PATH}?{}", query.finish())
    }

    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(self.path()).normalized()
    }
}

/// Encode `query` into the request for the page of `page_size` hits starting
/// at `offset`.
///
/// Every facet slot is rendered, absent ones as the empty string, in a fixed
/// order so the same query always produces the same filter list. Fails
/// before anything is encoded if a value would corrupt the filter list.
pub fn encode(query: &SearchQuery, page_size: usize, offset: usize) -> Result<SearchRequest> {
    // Slots before the result type carry a trailing separator, the ones
    // after it a leading one.
    let connection_of = leading_fragment(
        "connectionOf",
        "connection_of",
        query.connection_of.as_deref(),
    )?;
    let past_companies = list_fragment("pastCompany", "past_companies", &query.past_companies)?;
    let regions = list_fragment("geoRegion", "regions", &query.regions)?;
    let industries = list_fragment("industry", "industries", &query.industries)?;
    let network_codes: Vec<&str> = query.network_depth.iter().map(|d| d.code()).collect();
    let network = list_fragment("network", "network_depth", &network_codes)?;
    let languages = list_fragment(
        "profileLanguage",
        "profile_languages",
        &query.profile_languages,
    )?;

    let school = text_fragment("school", "school", query.school.as_deref())?;
    let company = text_fragment("company", "company", query.company.as_deref())?;
    let first_name = text_fragment("firstName", "first_name", query.first_name.as_deref())?;
    let last_name = text_fragment("lastName", "last_name", query.last_name.as_deref())?;
    let title = text_fragment("title", "title", query.title.as_deref())?;
    let current_companies = trailing_list_fragment(
        "currentCompany",
        "current_companies",
        &query.current_companies,
    )?;
    let schools = trailing_list_fragment("school", "schools", &query.schools)?;

    let filters = format!(
        "List({connection_of}{past_companies}{regions}{industries}{network}{languages}resultType->PEOPLE\
         {school}{company}{first_name}{last_name}{title}{current_companies}{schools})"
    );

    let keywords = query
        .keywords
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string);

    let origin = if query.has_facets() {
        Origin::FacetedSearch
    } else {
        Origin::ClusterExpansion
    };

    Ok(SearchRequest {
        filters,
        keywords,
        origin,
        count: page_size,
        start: offset,
    })
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn check_value(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SearchError::InvalidQuery {
            field,
            reason: "empty value".to_string(),
        });
    }
    if let Some(c) = value.chars().find(|c| RESERVED.contains(c)) {
        return Err(SearchError::InvalidQuery {
            field,
            reason: format!("'{value}' contains reserved character '{c}'"),
        });
    }
    Ok(())
}

fn joined<S: AsRef<str>>(field: &'static str, values: &[S]) -> Result<String> {
    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        let value = value.as_ref();
        check_value(field, value)?;
        parts.push(value.trim());
    }
    Ok(parts.join("|"))
}

/// `tag->a|b,` or empty.
fn list_fragment<S: AsRef<str>>(tag: &str, field: &'static str, values: &[S]) -> Result<String> {
    if values.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{tag}->{},", joined(field, values)?))
}

/// `,tag->a|b` or empty.
fn trailing_list_fragment<S: AsRef<str>>(
    tag: &str,
    field: &'static str,
    values: &[S],
) -> Result<String> {
    if values.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(",{tag}->{}", joined(field, values)?))
}

/// `tag->value,` or empty.
fn leading_fragment(tag: &str, field: &'static str, value: Option<&str>) -> Result<String> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            check_value(field, v)?;
            Ok(format!("{tag}->{},", v.trim()))
        }
        None => Ok(String::new()),
    }
}

/// `,tag->value` or empty.
fn text_fragment(tag: &str, field: &'static str, value: Option<&str>) -> Result<String> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            check_value(field, v)?;
            Ok(format!(",{tag}->{}", v.trim()))
        }
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_query() {
        let request = encode(&SearchQuery::new(), 49, 0).expect("encode empty query");
        assert_eq!(request.filters, "List(resultType->PEOPLE)");
        assert_eq!(request.origin, Origin::ClusterExpansion);
        assert_eq!(request.keywords, None);
        assert_eq!(request.count, 49);
        assert_eq!(request.start, 0);
    }

    #[test]
    fn test_encode_keywords_only_keeps_default_origin() {
        let query = SearchQuery::new().with_keywords("rust engineer");
        let request = encode(&query, 49, 0).expect("encode keyword query");
        assert_eq!(request.origin, Origin::ClusterExpansion);
        assert_eq!(request.keywords.as_deref(), Some("rust engineer"));
    }

    #[test]
    fn test_encode_fixed_fragment_order() {
        let query = SearchQuery::new()
            .with_schools(["17939"])
            .with_current_companies(["1035", "1441"])
            .with_title("Engineer")
            .with_last_name("Doe")
            .with_first_name("Jane")
            .with_company("Acme")
            .with_school("MIT")
            .with_profile_languages(["en"])
            .with_network_depth([NetworkDepth::Second, NetworkDepth::First])
            .with_industries(["4", "96"])
            .with_regions(["us:0"])
            .with_past_companies(["2000"])
            .with_connection_of("ACoAAB1");

        let request = encode(&query, 49, 0).expect("encode faceted query");
        assert_eq!(
            request.filters,
            "List(connectionOf->ACoAAB1,pastCompany->2000,geoRegion->us:0,industry->4|96,\
             network->F|S,profileLanguage->en,resultType->PEOPLE,school->MIT,company->Acme,\
             firstName->Jane,lastName->Doe,title->Engineer,currentCompany->1035|1441,school->17939)"
        );
        assert_eq!(request.origin, Origin::FacetedSearch);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let query = SearchQuery::new()
            .with_regions(["de:0"])
            .with_network_depth([NetworkDepth::Third, NetworkDepth::First]);
        let first = encode(&query, 49, 98).expect("encode");
        let second = encode(&query.clone(), 49, 98).expect("encode");
        assert_eq!(first, second);
        assert_eq!(first.path(), second.path());
    }

    #[test]
    fn test_encode_empty_company_list_renders_empty_fragment() {
        let query = SearchQuery::new()
            .with_current_companies(Vec::<String>::new())
            .with_regions(["us:0"]);
        let request = encode(&query, 49, 0).expect("encode");
        assert_eq!(request.filters, "List(geoRegion->us:0,resultType->PEOPLE)");
        assert!(!request.filters.contains("null"));
        assert!(!request.filters.contains("currentCompany"));
    }

    #[test]
    fn test_encode_empty_free_text_has_no_dangling_separator() {
        let query = SearchQuery::new().with_title("").with_first_name("Ada");
        let request = encode(&query, 49, 0).expect("encode");
        assert_eq!(request.filters, "List(resultType->PEOPLE,firstName->Ada)");
        assert!(!request.filters.contains(",,"));
    }

    #[test]
    fn test_encode_rejects_reserved_characters() {
        let query = SearchQuery::new().with_current_companies(["Acme, Inc"]);
        let err = encode(&query, 49, 0).expect_err("comma must be rejected");
        assert!(matches!(
            err,
            SearchError::InvalidQuery {
                field: "current_companies",
                ..
            }
        ));

        let query = SearchQuery::new().with_title("Eng|Ops");
        assert!(encode(&query, 49, 0).is_err());
    }

    #[test]
    fn test_encode_rejects_empty_list_entry() {
        let query = SearchQuery::new().with_regions(["us:0", "  "]);
        let err = encode(&query, 49, 0).expect_err("blank entry must be rejected");
        assert!(matches!(err, SearchError::InvalidQuery { field: "regions", .. }));
    }

    #[test]
    fn test_network_depth_parse() {
        assert_eq!("F".parse::<NetworkDepth>().expect("F"), NetworkDepth::First);
        assert_eq!("2".parse::<NetworkDepth>().expect("2"), NetworkDepth::Second);
        assert_eq!("o".parse::<NetworkDepth>().expect("o"), NetworkDepth::Third);
        assert!("X".parse::<NetworkDepth>().is_err());
    }

    #[test]
    fn test_request_path() {
        let query = SearchQuery::new()
            .with_keywords("data scientist")
            .with_network_depth([NetworkDepth::First]);
        let path = encode(&query, 49, 49).expect("encode").path();
        assert_eq!(
            path,
            "/search/blended?count=49\
             &filters=List%28network-%3EF%2CresultType-%3EPEOPLE%29\
             &keywords=data+scientist\
             &origin=FACETED_SEARCH\
             &q=all\
             &queryContext=List%28spellCorrectionEnabled-%3Etrue%2CrelatedSearchesEnabled-%3Etrue%29\
             &start=49"
        );
    }

    #[test]
    fn test_origin_override() {
        let query = SearchQuery::new().with_network_depth([NetworkDepth::First]);
        let request = encode(&query, 10, 0)
            .expect("encode")
            .with_origin(Origin::MemberProfileCannedSearch);
        assert!(request.path().contains("origin=MEMBER_PROFILE_CANNED_SEARCH"));
    }
}
