use serde::Deserialize;

use super::{
    api_token, strip_hash, token_at, url_tokens, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

#[derive(Debug)]
pub struct Gitlab {
    issues_api: String,
}

#[derive(Deserialize)]
struct Task {
    state: String,
}

impl Gitlab {
    /// `<host>/<owner>/<repo>`; the project path is sent URL-encoded.
    pub fn new(origin: &str) -> Result<Self, Error> {
        let tokens = url_tokens(origin);
        let scheme = token_at(&tokens, 0, origin)?;
        let host = token_at(&tokens, 1, origin)?;
        let owner = token_at(&tokens, 2, origin)?;
        let repo = token_at(&tokens, 3, origin)?;
        Ok(Self {
            issues_api: format!("{scheme}//{host}/api/v4/projects/{owner}%2F{repo}/issues"),
        })
    }
}

impl IssueTracker for Gitlab {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::Gitlab
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!("{}/{}", self.issues_api, strip_hash(issue_ref))
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Header {
                name: "PRIVATE-TOKEN",
                value: token.to_owned(),
            },
            None => Authorization::Anonymous,
        })
    }

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let task: Task = serde_json::from_slice(body)?;
        Ok(match task.state.as_str() {
            "closed" => TaskStatus::Closed,
            _ => TaskStatus::Open,
        })
    }

    fn token_instructions(&self) -> String {
        "Please go to your GitLab profile's Access Tokens page, create a token with read_api scope & paste it here.".into()
    }
}
