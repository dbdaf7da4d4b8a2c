use super::*;
use crate::logging::Logger;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fmt;

fn config(tracker: &str) -> Config {
    Config {
        issue_tracker: tracker.into(),
        ..Config::default()
    }
}

fn messages(errs: Vec<Error>) -> Vec<String> {
    errs.into_iter().map(|e| e.to_string()).collect()
}

#[derive(Default)]
struct Warnings(RefCell<Vec<String>>);

impl Logger for Warnings {
    fn debug(&self, _: fmt::Arguments<'_>) {}
    fn info(&self, _: fmt::Arguments<'_>) {}
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.0.borrow_mut().push(args.to_string());
    }
}

#[test]
fn valid_github_config() {
    assert!(validate(&config("GITHUB"), "github.com/owner/repo").is_empty());
}

#[test]
fn unsupported_tracker_stops_tracker_checks() {
    assert_eq!(
        messages(validate(&config("TRELLO"), "trello.com/x")),
        vec!["invalid issue tracker: \"TRELLO\" is not supported"]
    );
}

#[test]
fn reports_every_problem() {
    let mut cfg = config("GITLAB");
    cfg.auth.auth_type = AuthType::Offline;
    assert_eq!(
        messages(validate(&cfg, "gitlab.com/only-owner")),
        vec![
            "auth type chosen was \"offline\" but \"offline_url\" is not set",
            "gitlab.com/only-owner is not a valid origin for issue tracker GITLAB",
            "unsupported authentication type for GITLAB: offline",
        ]
    );
}

#[test]
fn offline_url_must_parse() {
    let mut cfg = config("JIRA");
    cfg.auth.auth_type = AuthType::Offline;
    cfg.auth.offline_url = Some("not a url".into());
    assert_eq!(
        messages(validate(&cfg, "jira.example.com")),
        vec!["invalid offline URL: \"not a url\""]
    );

    cfg.auth.offline_url = Some("https://jira.example.com/plugins/token".into());
    assert!(validate(&cfg, "jira.example.com").is_empty());
}

#[test]
fn jira_api_token_needs_username() {
    let mut cfg = config("JIRA");
    cfg.auth.auth_type = AuthType::ApiToken;
    assert_eq!(
        messages(validate(&cfg, "https://jira.example.com")),
        vec!["api token authentication for JIRA requires username to be set"]
    );

    cfg.auth.options.insert("username".into(), "me".into());
    assert!(validate(&cfg, "https://jira.example.com").is_empty());
}

#[test]
fn github_without_token_warns() {
    let logger = Warnings::default();
    warn_unauthenticated(IssueTrackerKind::Github, &Credentials::default(), &logger);
    assert_eq!(logger.0.borrow().len(), 1);
    assert!(logger.0.borrow()[0].starts_with("Github has API rate limits"));

    let logger = Warnings::default();
    let creds = Credentials {
        auth_type: AuthType::ApiToken,
        token: Some("t".into()),
        username: None,
    };
    warn_unauthenticated(IssueTrackerKind::Github, &creds, &logger);
    warn_unauthenticated(IssueTrackerKind::Gitlab, &Credentials::default(), &logger);
    assert!(logger.0.borrow().is_empty());
}
