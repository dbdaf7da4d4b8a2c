use std::time::Duration;

use serde::Deserialize;

use super::{required_token, with_scheme, Authorization, Credentials, IssueTracker, IssueTrackerKind};
use crate::checker::TaskStatus;
use crate::config::AuthType;
use crate::error::{Error, FetchError};

/// Jira server or cloud. Issue references are project keys such as `PROJ-12`.
#[derive(Debug)]
pub struct Jira {
    origin: String,
    server_version: u32,
}

/// Major version assumed when the server doesn't report one.
pub const DEFAULT_SERVER_VERSION: u32 = 9;

const SERVER_INFO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct ServerInfo {
    version: String,
}

#[derive(Deserialize)]
struct Task {
    fields: Fields,
}

#[derive(Deserialize)]
struct Fields {
    status: Status,
}

#[derive(Deserialize)]
struct Status {
    name: String,
}

impl Jira {
    /// Asks the server for its version; any failure falls back to
    /// [`DEFAULT_SERVER_VERSION`].
    pub fn new(origin: &str) -> Self {
        let origin = with_scheme(origin);
        let server_version = fetch_server_version(&origin).unwrap_or(DEFAULT_SERVER_VERSION);
        Self {
            origin,
            server_version,
        }
    }

    #[cfg(test)]
    pub fn with_server_version(origin: &str, server_version: u32) -> Self {
        Self {
            origin: with_scheme(origin),
            server_version,
        }
    }
}

fn fetch_server_version(origin: &str) -> Option<u32> {
    let client = reqwest::blocking::Client::builder()
        .timeout(SERVER_INFO_TIMEOUT)
        .build()
        .ok()?;
    let resp = client
        .get(format!("{origin}/rest/api/2/serverInfo"))
        .send()
        .ok()?;
    if !resp.status().is_success() {
        return None;
    }
    parse_server_version(&resp.bytes().ok()?)
}

/// Major component of a `serverInfo` payload such as `{"version":"8.20.1"}`.
pub(crate) fn parse_server_version(body: &[u8]) -> Option<u32> {
    let info: ServerInfo = serde_json::from_slice(body).ok()?;
    info.version.split('.').next()?.trim().parse().ok()
}

impl IssueTracker for Jira {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::Jira
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!("{}/rest/api/2/issue/{issue_ref}", self.origin)
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        match creds.auth_type {
            AuthType::None => Ok(Authorization::Anonymous),
            AuthType::Offline => Ok(Authorization::Bearer(required_token(creds)?.to_owned())),
            // Servers before 9 only accept personal access tokens as bearer.
            AuthType::ApiToken if self.server_version < 9 => {
                Ok(Authorization::Bearer(required_token(creds)?.to_owned()))
            }
            AuthType::ApiToken => {
                let username = creds.username.clone().ok_or_else(|| {
                    Error::Auth("api token authentication for JIRA requires username to be set".into())
                })?;
                Ok(Authorization::Basic {
                    username,
                    password: required_token(creds)?.to_owned(),
                })
            }
        }
    }

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let task: Task = serde_json::from_slice(body)?;
        Ok(match task.fields.status.name.as_str() {
            "Done" | "Closed" => TaskStatus::Closed,
            _ => TaskStatus::Open,
        })
    }

    fn token_instructions(&self) -> String {
        "Please go to https://id.atlassian.com/manage-profile/security/api-tokens, create an API token & paste it here.".into()
    }
}
