use serde::Deserialize;

use super::{
    api_token, strip_hash, with_scheme, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

#[derive(Debug)]
pub struct Redmine {
    origin: String,
}

#[derive(Deserialize)]
struct Task {
    issue: Issue,
}

#[derive(Deserialize)]
struct Issue {
    status: Status,
}

#[derive(Deserialize)]
struct Status {
    name: String,
}

impl Redmine {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: with_scheme(origin),
        }
    }
}

impl IssueTracker for Redmine {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::Redmine
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!("{}/issues/{}.json", self.origin, strip_hash(issue_ref))
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Header {
                name: "X-Redmine-API-Key",
                value: token.to_owned(),
            },
            None => Authorization::Anonymous,
        })
    }

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let task: Task = serde_json::from_slice(body)?;
        Ok(match task.issue.status.name.as_str() {
            "Resolved" | "Closed" | "Feedback" | "Rejected" => TaskStatus::Closed,
            _ => TaskStatus::Open,
        })
    }

    fn token_instructions(&self) -> String {
        format!(
            "Please go to {}/my/account, create a new API token & paste it here.",
            self.origin
        )
    }
}
