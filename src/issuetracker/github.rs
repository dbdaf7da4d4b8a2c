use serde::Deserialize;

use super::{
    api_token, strip_hash, token_at, url_tokens, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

#[derive(Debug)]
pub struct Github {
    repo_api: String,
}

#[derive(Deserialize)]
struct Task {
    state: String,
}

impl Github {
    /// `github.com/<owner>/<repo>`, with or without scheme.
    pub fn new(origin: &str) -> Result<Self, Error> {
        let tokens = url_tokens(origin);
        let scheme = token_at(&tokens, 0, origin)?;
        let owner = token_at(&tokens, 2, origin)?;
        let repo = token_at(&tokens, 3, origin)?;
        Ok(Self {
            repo_api: format!("{scheme}//api.github.com/repos/{owner}/{repo}"),
        })
    }
}

impl IssueTracker for Github {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::Github
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!("{}/issues/{}", self.repo_api, strip_hash(issue_ref))
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Bearer(token.to_owned()),
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
        "Please go to https://github.com/settings/tokens, create a read-only access token & paste it here.".into()
    }
}
