use serde::Deserialize;
use serde_json::Value;

use super::{
    api_token, strip_hash, token_at, url_tokens, Authorization, Credentials, IssueTracker,
    IssueTrackerKind,
};
use crate::checker::TaskStatus;
use crate::error::{Error, FetchError};

const STATE_FIELD: &str = "StateIssueCustomField";

#[derive(Debug)]
pub struct Youtrack {
    issues_api: String,
}

#[derive(Deserialize)]
struct Task {
    #[serde(rename = "customFields", default)]
    custom_fields: Vec<CustomField>,
}

#[derive(Deserialize)]
struct CustomField {
    #[serde(rename = "$type", default)]
    field_type: String,
    #[serde(default)]
    value: Option<Value>,
}

impl Youtrack {
    pub fn new(origin: &str) -> Result<Self, Error> {
        let tokens = url_tokens(origin);
        let scheme = token_at(&tokens, 0, origin)?;
        let instance = token_at(&tokens, 1, origin)?;
        Ok(Self {
            issues_api: format!("{scheme}//{instance}/youtrack/api/issues"),
        })
    }
}

impl IssueTracker for Youtrack {
    fn kind(&self) -> IssueTrackerKind {
        IssueTrackerKind::Youtrack
    }

    fn issue_url(&self, issue_ref: &str) -> String {
        format!(
            "{}/{}?fields=customFields(value(isResolved))",
            self.issues_api,
            strip_hash(issue_ref)
        )
    }

    fn authorization(&self, creds: &Credentials) -> Result<Authorization, Error> {
        Ok(match api_token(creds, self.kind())? {
            Some(token) => Authorization::Bearer(token.to_owned()),
            None => Authorization::Anonymous,
        })
    }

    /// The state custom field's `isResolved`. No state field means open.
    fn status_from(&self, body: &[u8]) -> Result<TaskStatus, FetchError> {
        let task: Task = serde_json::from_slice(body)?;
        let Some(state) = task
            .custom_fields
            .iter()
            .find(|f| f.field_type == STATE_FIELD)
        else {
            return Ok(TaskStatus::Open);
        };

        let resolved = state
            .value
            .as_ref()
            .and_then(|v| v.get("isResolved"))
            .and_then(Value::as_bool)
            .ok_or_else(|| FetchError::MissingStatus("youtrack state field has no value".into()))?;
        Ok(if resolved {
            TaskStatus::Closed
        } else {
            TaskStatus::Open
        })
    }

    fn token_instructions(&self) -> String {
        "Please go to https://www.jetbrains.com/help/youtrack/standalone/Manage-Permanent-Token.html, follow the tutorial & paste the API token here.".into()
    }
}
