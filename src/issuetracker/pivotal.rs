use serde::Deserialize;

use super::{
    api_token, strip_hash, token_at, url_tokens, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

#[derive(Debug)]
pub struct Pivotal {
    stories_api: String,
}

#[derive(Deserialize)]
struct Story {
    current_state: String,
}

impl Pivotal {
    /// `pivotaltracker.com/n/projects/<id>`; the `/n` segment is optional.
    pub fn new(origin: &str) -> Result<Self, Error> {
        let tokens = url_tokens(origin);
        let scheme = token_at(&tokens, 0, origin)?;
        let project_idx = if token_at(&tokens, 2, origin)? == "n" { 4 } else { 3 };
        let project = token_at(&tokens, project_idx, origin)?;
        Ok(Self {
            stories_api: format!(
                "{scheme}//www.pivotaltracker.com/services/v5/projects/{project}/stories"
            ),
        })
    }
}

impl IssueTracker for Pivotal {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::PivotalTracker
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!("{}/{}", self.stories_api, strip_hash(issue_ref))
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Header {
                name: "X-TrackerToken",
                value: token.to_owned(),
            },
            None => Authorization::Anonymous,
        })
    }

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let story: Story = serde_json::from_slice(body)?;
        Ok(match story.current_state.as_str() {
            "finished" | "delivered" | "accepted" | "rejected" => TaskStatus::Closed,
            _ => TaskStatus::Open,
        })
    }

    fn token_instructions(&self) -> String {
        "Please go to https://www.pivotaltracker.com/profile, copy your API token & paste it here.".into()
    }
}
