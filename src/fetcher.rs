use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};

use crate::checker::{IssueStatusSource, TaskStatus};
use crate::error::{Error, FetchError};
use crate::issuetracker::{Authorization, Credentials, IssueTracker};
use crate::logging::Logger;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("todocheck/", env!("CARGO_PKG_VERSION"));

/// Looks issue statuses up through the tracker's REST API. Each reference is
/// requested at most once per fetcher.
pub struct Fetcher<'l> {
    client: Client,
    tracker: Box<dyn IssueTracker>,
    origin: String,
    authorization: Authorization,
    cache: HashMap<(String, String), TaskStatus>,
    logger: &'l dyn Logger,
}

impl<'l> Fetcher<'l> {
    pub fn new(
        tracker: Box<dyn IssueTracker>,
        origin: &str,
        creds: &Credentials,
        logger: &'l dyn Logger,
    ) -> Result<Self, Error> {
        let authorization = tracker.authorization(creds)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::from)?;
        Ok(Self {
            client,
            tracker,
            origin: origin.to_owned(),
            authorization,
            cache: HashMap::new(),
            logger,
        })
    }

    fn request(&self, issue_ref: &str) -> Result<TaskStatus, FetchError> {
        let url = self.tracker.issue_url(issue_ref);
        self.logger
            .debug(format_args!("fetching {} issue {issue_ref}: GET {url}", self.tracker.kind()));
        let resp = authorize(self.client.get(&url), &self.authorization).send()?;
        let status = resp.status();
        let body = resp.bytes()?;
        status_from_response(self.tracker.as_ref(), status, &body)
    }
}

fn authorize(req: RequestBuilder, auth: &Authorization) -> RequestBuilder {
    match auth {
        Authorization::Anonymous => req,
        Authorization::Bearer(token) => req.bearer_auth(token),
        Authorization::Basic { username, password } => req.basic_auth(username, Some(password)),
        Authorization::Header { name, value } => req.header(*name, value.as_str()),
    }
}

/// 404 means the issue doesn't exist; anything else but 200 is a failure.
pub fn status_from_response(
    tracker: &dyn IssueTracker,
    status: StatusCode,
    body: &[u8],
) -> Result<TaskStatus, FetchError> {
    match status {
        StatusCode::NOT_FOUND => Ok(TaskStatus::NonExistent),
        StatusCode::OK => tracker.status_from(body),
        _ => Err(FetchError::BadStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

impl IssueStatusSource for Fetcher<'_> {
    fn fetch(&mut self, issue_ref: &str) -> Result<TaskStatus, FetchError> {
        let key = (self.origin.clone(), issue_ref.to_owned());
        if let Some(status) = self.cache.get(&key) {
            self.logger
                .debug(format_args!("cache hit for issue {issue_ref}: {status:?}"));
            return Ok(*status);
        }
        let status = self.request(issue_ref)?;
        self.cache.insert(key, status);
        Ok(status)
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
