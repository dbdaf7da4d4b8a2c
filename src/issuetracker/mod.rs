/// Issue tracker integrations: where an issue lives, how to authenticate and
/// how to read its status from the API response.
mod azure;
mod github;
mod gitlab;
mod jira;
mod pivotal;
mod redmine;
mod youtrack;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checker::TaskStatus;
use crate::config::AuthType;
use crate::error::{Error, FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueTrackerKind {
    Github,
    Gitlab,
    Jira,
    PivotalTracker,
    Redmine,
    Youtrack,
    AzureBoards,
}

impl IssueTrackerKind {
    pub const ALL: [IssueTrackerKind; 7] = [
        IssueTrackerKind::Github,
        IssueTrackerKind::Gitlab,
        IssueTrackerKind::Jira,
        IssueTrackerKind::PivotalTracker,
        IssueTrackerKind::Redmine,
        IssueTrackerKind::Youtrack,
        IssueTrackerKind::AzureBoards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueTrackerKind::Github => "GITHUB",
            IssueTrackerKind::Gitlab => "GITLAB",
            IssueTrackerKind::Jira => "JIRA",
            IssueTrackerKind::PivotalTracker => "PIVOTAL_TRACKER",
            IssueTrackerKind::Redmine => "REDMINE",
            IssueTrackerKind::Youtrack => "YOUTRACK",
            IssueTrackerKind::AzureBoards => "AZURE_BOARDS",
        }
    }

    pub fn supports_auth(self, auth: AuthType) -> bool {
        match auth {
            AuthType::None | AuthType::ApiToken => true,
            AuthType::Offline => self == IssueTrackerKind::Jira,
        }
    }

    pub fn is_valid_origin(self, origin: &str) -> bool {
        origin_pattern(self).is_match(origin)
    }
}

impl fmt::Display for IssueTrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueTrackerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueTrackerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::Config(format!("invalid issue tracker: {s:?} is not supported")))
    }
}

const HOST: &str = r"^(https?://)?[a-zA-Z0-9\-]+(\.[a-zA-Z0-9]+)+(:[0-9]+)?";

/// Indexed by `IssueTrackerKind as usize`.
static ORIGIN_PATTERNS: LazyLock<[Regex; 7]> = LazyLock::new(|| {
    let re = |p: &str| Regex::new(p).expect("static pattern compiles");
    [
        re(r"^(https?://)?(www\.)?github\.com/[\w-]+/[\w-]+"),
        re(&format!(r"{HOST}/[\w-]+/[\w-]+$")),
        re(&format!("{HOST}$")),
        re(r"^(https?://)?(www\.)?pivotaltracker\.com/n/projects/[0-9]+"),
        re(&format!("{HOST}$")),
        re(&format!("{HOST}/?$")),
        re(r"^(https?://)?dev\.azure\.com/[\w-]+/[\w-]+"),
    ]
});

fn origin_pattern(kind: IssueTrackerKind) -> &'static Regex {
    &ORIGIN_PATTERNS[kind as usize]
}

/// What the user authenticated with, resolved from config and token store.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub auth_type: AuthType,
    pub token: Option<String>,
    pub username: Option<String>,
}

/// How a request gets authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Anonymous,
    Bearer(String),
    Basic { username: String, password: String },
    Header { name: &'static str, value: String },
}

pub trait IssueTracker {
    fn kind(&self) -> IssueTrackerKind;

    /// Full REST URL of the issue.
    fn issue_url(&self, issue_ref: &str) -> String;

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error>;

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError>;

    /// Shown when prompting for a token.
    fn token_instructions(&self) -> String;
}

pub fn for_origin(kind: IssueTrackerKind, origin: &str) -> Result<Box<dyn IssueTracker>, Error> {
    Ok(match kind {
        IssueTrackerKind::Github => Box::new(github::Github::new(origin)?),
        IssueTrackerKind::Gitlab => Box::new(gitlab::Gitlab::new(origin)?),
        IssueTrackerKind::Jira => Box::new(jira::Jira::new(origin)),
        IssueTrackerKind::PivotalTracker => Box::new(pivotal::Pivotal::new(origin)?),
        IssueTrackerKind::Redmine => Box::new(redmine::Redmine::new(origin)),
        IssueTrackerKind::Youtrack => Box::new(youtrack::Youtrack::new(origin)?),
        IssueTrackerKind::AzureBoards => Box::new(azure::Azure::new(origin)?),
    })
}

/// Lower-cased, `/`-separated parts of an origin with the scheme first,
/// `https:` when the origin has none.
fn url_tokens(origin: &str) -> Vec<String> {
    let mut tokens: Vec<String> = origin
        .to_lowercase()
        .split('/')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    if !tokens.first().is_some_and(|t| t.starts_with("http")) {
        tokens.insert(0, "https:".to_owned());
    }
    tokens
}

fn token_at<'a>(tokens: &'a [String], idx: usize, origin: &str) -> Result<&'a str, Error> {
    tokens
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(format!("origin {origin:?} is missing a path segment")))
}

/// The origin as given, with `https://` added when it has no scheme.
fn with_scheme(origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if origin.starts_with("http://") || origin.starts_with("https://") {
        origin.to_owned()
    } else {
        format!("https://{origin}")
    }
}

fn strip_hash(issue_ref: &str) -> &str {
    issue_ref.strip_prefix('#').unwrap_or(issue_ref)
}

/// The token for trackers that only know `none` and `apitoken`.
fn api_token<'a>(creds: &'a Credentials, kind: IssueTrackerKind) -> Result<Option<&'a str>, Error> {
    match creds.auth_type {
        AuthType::None => Ok(None),
        AuthType::ApiToken => required_token(creds).map(Some),
        other => Err(Error::Auth(format!(
            "unsupported authentication token type for {kind}: {other}"
        ))),
    }
}

fn required_token(creds: &Credentials) -> Result<&str, Error> {
    creds
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Auth("authentication token is empty".into()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
