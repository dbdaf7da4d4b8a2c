use reqwest::Url;

use super::{AuthType, Config};
use crate::error::Error;
use crate::issuetracker::{Credentials, IssueTrackerKind};
use crate::logging::Logger;

/// Every problem with `cfg`, given the resolved origin. Empty when usable.
pub fn validate(cfg: &Config, origin: &str) -> Vec<Error> {
    let mut errs = Vec::new();

    let tracker = match cfg.tracker() {
        Ok(kind) => Some(kind),
        Err(err) => {
            errs.push(err);
            None
        }
    };

    if cfg.auth.auth_type == AuthType::Offline {
        match cfg.auth.offline_url.as_deref() {
            None | Some("") => errs.push(Error::Config(format!(
                "auth type chosen was {:?} but \"offline_url\" is not set",
                cfg.auth.auth_type.to_string()
            ))),
            Some(url) if Url::parse(url).is_err() => {
                errs.push(Error::Config(format!("invalid offline URL: {url:?}")))
            }
            Some(_) => {}
        }
    }

    let Some(tracker) = tracker else {
        return errs;
    };

    if !tracker.is_valid_origin(origin) {
        errs.push(Error::Config(format!(
            "{origin} is not a valid origin for issue tracker {tracker}"
        )));
    }

    if !tracker.supports_auth(cfg.auth.auth_type) {
        errs.push(Error::Config(format!(
            "unsupported authentication type for {tracker}: {}",
            cfg.auth.auth_type
        )));
    }

    if tracker == IssueTrackerKind::Jira
        && cfg.auth.auth_type == AuthType::ApiToken
        && !cfg.auth.options.contains_key("username")
    {
        errs.push(Error::Config(
            "api token authentication for JIRA requires username to be set".into(),
        ));
    }

    errs
}

/// Unauthenticated GitHub requests share a small hourly quota.
pub fn warn_unauthenticated(kind: IssueTrackerKind, creds: &Credentials, logger: &dyn Logger) {
    if kind == IssueTrackerKind::Github && creds.token.as_deref().is_none_or(str::is_empty) {
        logger.warn(format_args!(
            "Github has API rate limits for all requests which do not contain a token. \
             Please create a read-only access token to increase that limit."
        ));
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
