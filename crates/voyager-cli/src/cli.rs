use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use voyager_core::Urn;
use voyager_search::{NetworkDepth, SearchQuery};

#[derive(Parser, Debug)]
#[command(name = "voyager", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search people, printing one JSON record per line
    SearchPeople(SearchArgs),
    /// List first-degree connections of a member
    Connections {
        /// Urn id (or full urn) of the member
        urn_id: String,
        /// Stop after this many results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the number of connections of the logged-in member
    ConnectionCount,
    /// List posts of a company or member
    Updates(UpdatesArgs),
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free-text keywords
    #[arg(long)]
    pub keywords: Option<String>,
    /// Current company id (repeatable)
    #[arg(long = "company", value_name = "ID")]
    pub companies: Vec<String>,
    /// Past company id (repeatable)
    #[arg(long = "past-company", value_name = "ID")]
    pub past_companies: Vec<String>,
    /// School id (repeatable)
    #[arg(long = "school", value_name = "ID")]
    pub schools: Vec<String>,
    /// Geo region code (repeatable)
    #[arg(long = "region", value_name = "CODE")]
    pub regions: Vec<String>,
    /// Industry id (repeatable)
    #[arg(long = "industry", value_name = "ID")]
    pub industries: Vec<String>,
    /// Profile language code (repeatable)
    #[arg(long = "language", value_name = "CODE")]
    pub languages: Vec<String>,
    /// Network depth: F, S or O (repeatable)
    #[arg(long = "network-depth", value_name = "DEPTH")]
    pub network_depth: Vec<NetworkDepth>,
    /// Only connections of this member (urn id or full urn)
    #[arg(long, value_name = "URN_ID")]
    pub connection_of: Option<String>,
    /// Job title
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// Stop after this many results
    #[arg(long)]
    pub limit: Option<usize>,
    /// Keep members without a public profile
    #[arg(long)]
    pub include_private: bool,
}

impl SearchArgs {
    pub fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new()
            .with_current_companies(&self.companies)
            .with_past_companies(&self.past_companies)
            .with_schools(&self.schools)
            .with_regions(&self.regions)
            .with_industries(&self.industries)
            .with_profile_languages(&self.languages)
            .with_network_depth(self.network_depth.iter().copied());

        if let Some(keywords) = &self.keywords {
            query = query.with_keywords(keywords.as_str());
        }
        if let Some(urn_id) = &self.connection_of {
            query = query.with_connection_of(member_id(urn_id));
        }
        if let Some(title) = &self.title {
            query = query.with_title(title.as_str());
        }
        if let Some(first_name) = &self.first_name {
            query = query.with_first_name(first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            query = query.with_last_name(last_name.as_str());
        }
        query
    }
}

/// Compact member id from either a bare id or a full `urn:li:<type>:<id>`.
pub fn member_id(raw: &str) -> String {
    Urn::new(raw.trim()).map_or_else(|_| raw.trim().to_string(), |urn| urn.id().to_string())
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).multiple(false)))]
pub struct UpdatesArgs {
    /// Company universal name or urn id
    #[arg(long, group = "source")]
    pub company: Option<String>,
    /// Member public id or urn id
    #[arg(long, group = "source")]
    pub profile: Option<String>,
    /// Stop after this many posts
    #[arg(long)]
    pub limit: Option<usize>,
}
