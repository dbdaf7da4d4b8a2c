use serde::Deserialize;

use super::{
    api_token, strip_hash, token_at, url_tokens, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

const API_VERSION: &str = "6.0";

/// Azure Boards work items of `dev.azure.com/<org>/<project>`.
#[derive(Debug)]
pub struct Azure {
    workitems_api: String,
}

#[derive(Deserialize)]
struct WorkItem {
    fields: Fields,
}

#[derive(Deserialize)]
struct Fields {
    #[serde(rename = "System.State")]
    state: String,
}

impl Azure {
    pub fn new(origin: &str) -> Result<Self, Error> {
        let tokens = url_tokens(origin);
        let scheme = token_at(&tokens, 0, origin)?;
        let org = token_at(&tokens, 2, origin)?;
        let project = token_at(&tokens, 3, origin)?;
        Ok(Self {
            workitems_api: format!("{scheme}//dev.azure.com/{org}/{project}/_apis/wit/workitems"),
        })
    }
}

impl IssueTracker for Azure {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::AzureBoards
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!(
            "{}/{}?api-version={API_VERSION}",
            self.workitems_api,
            strip_hash(issue_ref)
        )
    }

    /// Personal access tokens go in as the password of an empty user.
    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Basic {
                username: String::new(),
                password: token.to_owned(),
            },
            None => Authorization::Anonymous,
        })
    }

    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let item: WorkItem = serde_json::from_slice(body)?;
        Ok(match item.fields.state.as_str() {
            "Closed" | "Done" | "Removed" | "Resolved" => TaskStatus::Closed,
            _ => TaskStatus::Open,
        })
    }

    fn token_instructions(&self) -> String {
        "Please create a read-only personal access token in Azure DevOps & paste it here.".into()
    }
}
