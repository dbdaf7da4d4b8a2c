use super::*;
use pretty_assertions::assert_eq;

fn tracker(kind: IssueTrackerKind, origin: &str) -> Box<dyn IssueTracker> {
    match kind {
        IssueTrackerKind::Jira => Box::new(jira::Jira::with_server_version(
            origin,
            jira::DEFAULT_SERVER_VERSION,
        )),
        _ => for_origin(kind, origin).unwrap(),
    }
}

fn token(auth_type: AuthType) -> Credentials {
    Credentials {
        auth_type,
        token: Some("s3cret".into()),
        username: None,
    }
}

#[test]
fn parses_tracker_names() {
    assert_eq!(
        "PIVOTAL_TRACKER".parse::<IssueTrackerKind>().unwrap(),
        IssueTrackerKind::PivotalTracker
    );
    for kind in IssueTrackerKind::ALL {
        assert_eq!(kind.as_str().parse::<IssueTrackerKind>().unwrap(), kind);
    }
    let err = "BITBUCKET".parse::<IssueTrackerKind>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid issue tracker: \"BITBUCKET\" is not supported"
    );
}

#[test]
fn origin_patterns() {
    use IssueTrackerKind::*;
    assert!(Github.is_valid_origin("github.com/preslavmihaylov/todocheck"));
    assert!(Github.is_valid_origin("https://github.com/a/b"));
    assert!(!Github.is_valid_origin("gitlab.com/a/b"));
    assert!(Gitlab.is_valid_origin("gitlab.example.com/group/project"));
    assert!(!Gitlab.is_valid_origin("gitlab.example.com/group"));
    assert!(Jira.is_valid_origin("https://jira.example.com"));
    assert!(Jira.is_valid_origin("jira.example.com:8080"));
    assert!(!Jira.is_valid_origin("jira.example.com/browse"));
    assert!(PivotalTracker.is_valid_origin("pivotaltracker.com/n/projects/2433300"));
    assert!(Redmine.is_valid_origin("http://redmine.example.org"));
    assert!(Youtrack.is_valid_origin("https://yt.example.com/"));
    assert!(AzureBoards.is_valid_origin("https://dev.azure.com/org/project"));
    assert!(!AzureBoards.is_valid_origin("https://azure.com/org/project"));
}

#[test]
fn only_jira_supports_offline_auth() {
    for kind in IssueTrackerKind::ALL {
        assert!(kind.supports_auth(AuthType::None));
        assert!(kind.supports_auth(AuthType::ApiToken));
        assert_eq!(
            kind.supports_auth(AuthType::Offline),
            kind == IssueTrackerKind::Jira
        );
    }
}

#[test]
fn issue_urls() {
    use IssueTrackerKind::*;
    let cases = [
        (
            Github,
            "github.com/Owner/Repo",
            "#12",
            "https://api.github.com/repos/owner/repo/issues/12",
        ),
        (
            Gitlab,
            "http://gitlab.local/group/proj",
            "3",
            "http://gitlab.local/api/v4/projects/group%2Fproj/issues/3",
        ),
        (
            Jira,
            "jira.example.com/",
            "PROJ-7",
            "https://jira.example.com/rest/api/2/issue/PROJ-7",
        ),
        (
            Redmine,
            "http://redmine.local",
            "#44",
            "http://redmine.local/issues/44.json",
        ),
        (
            PivotalTracker,
            "https://www.pivotaltracker.com/n/projects/2433300",
            "#1750",
            "https://www.pivotaltracker.com/services/v5/projects/2433300/stories/1750",
        ),
        (
            PivotalTracker,
            "pivotaltracker.com/projects/99",
            "1",
            "https://www.pivotaltracker.com/services/v5/projects/99/stories/1",
        ),
        (
            Youtrack,
            "https://yt.example.com",
            "DEMO-3",
            "https://yt.example.com/youtrack/api/issues/DEMO-3?fields=customFields(value(isResolved))",
        ),
        (
            AzureBoards,
            "https://dev.azure.com/org/proj",
            "#8",
            "https://dev.azure.com/org/proj/_apis/wit/workitems/8?api-version=6.0",
        ),
    ];
    for (kind, origin, issue, url) in cases {
        assert_eq!(tracker(kind, origin).issue_url(issue), url, "{kind}");
    }
}

#[test]
fn short_origin_is_a_config_error() {
    let err = for_origin(IssueTrackerKind::Github, "github.com/owner")
        .err()
        .unwrap();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn authorization_per_tracker() {
    use IssueTrackerKind::*;
    let creds = token(AuthType::ApiToken);
    assert_eq!(
        tracker(Github, "github.com/a/b").authorization(&creds).unwrap(),
        Authorization::Bearer("s3cret".into())
    );
    assert_eq!(
        tracker(Gitlab, "gitlab.com/a/b").authorization(&creds).unwrap(),
        Authorization::Header {
            name: "PRIVATE-TOKEN",
            value: "s3cret".into()
        }
    );
    assert_eq!(
        tracker(Redmine, "redmine.local").authorization(&creds).unwrap(),
        Authorization::Header {
            name: "X-Redmine-API-Key",
            value: "s3cret".into()
        }
    );
    assert_eq!(
        tracker(PivotalTracker, "pivotaltracker.com/n/projects/1")
            .authorization(&creds)
            .unwrap(),
        Authorization::Header {
            name: "X-TrackerToken",
            value: "s3cret".into()
        }
    );
    assert_eq!(
        tracker(AzureBoards, "dev.azure.com/o/p")
            .authorization(&creds)
            .unwrap(),
        Authorization::Basic {
            username: String::new(),
            password: "s3cret".into()
        }
    );
    assert_eq!(
        tracker(Github, "github.com/a/b")
            .authorization(&Credentials::default())
            .unwrap(),
        Authorization::Anonymous
    );
}

#[test]
fn jira_authorization() {
    let jira = tracker(IssueTrackerKind::Jira, "jira.local");
    assert_eq!(
        jira.authorization(&token(AuthType::Offline)).unwrap(),
        Authorization::Bearer("s3cret".into())
    );

    let mut creds = token(AuthType::ApiToken);
    assert!(matches!(jira.authorization(&creds), Err(Error::Auth(_))));
    creds.username = Some("me@example.com".into());
    assert_eq!(
        jira.authorization(&creds).unwrap(),
        Authorization::Basic {
            username: "me@example.com".into(),
            password: "s3cret".into()
        }
    );
}

#[test]
fn old_jira_servers_take_api_tokens_as_bearer() {
    let jira = jira::Jira::with_server_version("jira.local", 8);
    assert_eq!(
        jira.authorization(&token(AuthType::ApiToken)).unwrap(),
        Authorization::Bearer("s3cret".into())
    );
}

#[test]
fn jira_server_version_parsing() {
    assert_eq!(jira::parse_server_version(br#"{"version":"8.20.1"}"#), Some(8));
    assert_eq!(jira::parse_server_version(br#"{"version":"10"}"#), Some(10));
    assert_eq!(jira::parse_server_version(br#"{"version":"v9"}"#), None);
    assert_eq!(jira::parse_server_version(b"<html>"), None);
}

#[test]
fn unreachable_jira_server_uses_default_version() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let jira = jira::Jira::new(&format!("http://{addr}"));
    let mut creds = token(AuthType::ApiToken);
    creds.username = Some("me@example.com".into());
    assert_eq!(
        jira.authorization(&creds).unwrap(),
        Authorization::Basic {
            username: "me@example.com".into(),
            password: "s3cret".into()
        }
    );
}

#[test]
fn unsupported_or_empty_tokens_are_rejected() {
    let github = tracker(IssueTrackerKind::Github, "github.com/a/b");
    let err = github.authorization(&token(AuthType::Offline)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "couldn't acquire token: unsupported authentication token type for GITHUB: offline"
    );

    let empty = Credentials {
        auth_type: AuthType::ApiToken,
        token: Some(String::new()),
        username: None,
    };
    assert!(matches!(github.authorization(&empty), Err(Error::Auth(_))));
}

#[test]
fn github_and_gitlab_status() {
    for kind in [IssueTrackerKind::Github, IssueTrackerKind::Gitlab] {
        let t = tracker(kind, "gitlab.com/a/b");
        assert_eq!(
            t.status_from(br#"{"state":"closed","title":"x"}"#).unwrap(),
            TaskStatus::Closed
        );
        assert_eq!(
            t.status_from(br#"{"state":"opened"}"#).unwrap(),
            TaskStatus::Open
        );
    }
}

#[test]
fn jira_and_redmine_status() {
    let jira = tracker(IssueTrackerKind::Jira, "jira.local");
    assert_eq!(
        jira.status_from(br#"{"fields":{"status":{"name":"Done"}}}"#)
            .unwrap(),
        TaskStatus::Closed
    );
    assert_eq!(
        jira.status_from(br#"{"fields":{"status":{"name":"In Progress"}}}"#)
            .unwrap(),
        TaskStatus::Open
    );

    let redmine = tracker(IssueTrackerKind::Redmine, "redmine.local");
    assert_eq!(
        redmine
            .status_from(br#"{"issue":{"status":{"id":6,"name":"Rejected"}}}"#)
            .unwrap(),
        TaskStatus::Closed
    );
    assert_eq!(
        redmine
            .status_from(br#"{"issue":{"status":{"id":1,"name":"New"}}}"#)
            .unwrap(),
        TaskStatus::Open
    );
}

#[test]
fn pivotal_and_azure_status() {
    let pivotal = tracker(IssueTrackerKind::PivotalTracker, "pivotaltracker.com/n/projects/1");
    assert_eq!(
        pivotal
            .status_from(br#"{"current_state":"accepted"}"#)
            .unwrap(),
        TaskStatus::Closed
    );
    assert_eq!(
        pivotal.status_from(br#"{"current_state":"started"}"#).unwrap(),
        TaskStatus::Open
    );

    let azure = tracker(IssueTrackerKind::AzureBoards, "dev.azure.com/o/p");
    assert_eq!(
        azure
            .status_from(br#"{"id":8,"fields":{"System.State":"Removed"}}"#)
            .unwrap(),
        TaskStatus::Closed
    );
    assert_eq!(
        azure
            .status_from(br#"{"fields":{"System.State":"Active"}}"#)
            .unwrap(),
        TaskStatus::Open
    );
}

#[test]
fn youtrack_status() {
    let yt = tracker(IssueTrackerKind::Youtrack, "yt.example.com");
    let resolved = br#"{"customFields":[
        {"$type":"SingleEnumIssueCustomField","value":{"name":"Normal"}},
        {"$type":"StateIssueCustomField","value":{"isResolved":true}}
    ]}"#;
    assert_eq!(yt.status_from(resolved).unwrap(), TaskStatus::Closed);

    let open = br#"{"customFields":[{"$type":"StateIssueCustomField","value":{"isResolved":false}}]}"#;
    assert_eq!(yt.status_from(open).unwrap(), TaskStatus::Open);

    assert_eq!(
        yt.status_from(br#"{"customFields":[]}"#).unwrap(),
        TaskStatus::Open
    );

    let missing = br#"{"customFields":[{"$type":"StateIssueCustomField","value":null}]}"#;
    assert!(matches!(
        yt.status_from(missing),
        Err(FetchError::MissingStatus(_))
    ));
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let github = tracker(IssueTrackerKind::Github, "github.com/a/b");
    assert!(matches!(
        github.status_from(b"<html>rate limited</html>"),
        Err(FetchError::Decode(_))
    ));
}
