use super::todo_error::{TodoErrorKind, MALFORMED_HINT};
use super::*;
use crate::language::Dialect;
use crate::logging::NoopLogger;
use crate::todos::{CaseInsensitive, TodoMatcher};
use pretty_assertions::assert_eq;

fn comment(text: &str) -> Comment {
    Comment {
        text: text.to_string(),
        filename: "main.go".to_string(),
        lines: vec![format!("{text}\n")],
        line_no: 7,
    }
}

fn matcher() -> TodoMatcher {
    TodoMatcher::new(Dialect::Standard { nested: false }, &[]).unwrap()
}

struct FailingSource;

impl IssueStatusSource for FailingSource {
    fn fetch(&mut self, _: &str) -> Result<TaskStatus, FetchError> {
        Err(FetchError::BadStatus {
            status: 500,
            body: "boom".into(),
        })
    }
}

#[test]
fn non_todo_comment_is_not_fetched() {
    let logger = NoopLogger;
    let mut source = StaticStatuses::default();
    let mut checker = Checker::new(&mut source, &logger);
    let res = checker.check(&matcher(), &comment("// plain")).unwrap();
    assert_eq!(res, None);
    assert_eq!(source.fetches, 0);
}

#[test]
fn malformed_todo_is_reported_without_fetch() {
    let logger = NoopLogger;
    let mut source = StaticStatuses::default();
    let mut checker = Checker::new(&mut source, &logger);
    let err = checker
        .check(&matcher(), &comment("// TODO: no issue"))
        .unwrap()
        .unwrap();
    assert_eq!(err.kind, TodoErrorKind::Malformed);
    assert_eq!(err.line_no, 7);
    assert_eq!(err.issue_ref, None);
    assert_eq!(source.fetches, 0);
}

#[test]
fn statuses_map_to_errors() {
    let logger = NoopLogger;
    let mut source = StaticStatuses::with(&[
        ("1", TaskStatus::Open),
        ("2", TaskStatus::Closed),
        ("3", TaskStatus::NonExistent),
    ]);
    let mut checker = Checker::new(&mut source, &logger);
    let m = matcher();

    assert_eq!(checker.check(&m, &comment("// TODO 1: open")).unwrap(), None);

    let closed = checker.check(&m, &comment("// TODO 2: closed")).unwrap().unwrap();
    assert_eq!(closed.kind, TodoErrorKind::IssueClosed);
    assert_eq!(closed.issue_ref.as_deref(), Some("2"));

    let missing = checker.check(&m, &comment("// TODO 3: gone")).unwrap().unwrap();
    assert_eq!(missing.kind, TodoErrorKind::IssueNonExistent);
    assert_eq!(missing.issue_ref.as_deref(), Some("3"));

    assert_eq!(source.fetches, 3);
}

#[test]
fn fetch_failure_is_a_hard_error() {
    let logger = NoopLogger;
    let mut checker = Checker::new(FailingSource, &logger);
    let err = checker
        .check(&matcher(), &comment("// TODO 1: x"))
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::BadStatus { status: 500, .. })));
    assert!(!err.is_defect());
}

#[test]
fn case_insensitive_matcher_flows_through() {
    let logger = NoopLogger;
    let mut source = StaticStatuses::with(&[("5", TaskStatus::Closed)]);
    let mut checker = Checker::new(&mut source, &logger);
    let m = CaseInsensitive::new(matcher());
    let err = checker.check(&m, &comment("// todo 5: x")).unwrap().unwrap();
    assert_eq!(err.kind, TodoErrorKind::IssueClosed);
}

#[test]
fn single_line_error_location() {
    let err = TodoError::issue_closed(&comment("// TODO 2: closed"), "2");
    assert_eq!(err.source_location(), "main.go:7: // TODO 2: closed\n");
    assert_eq!(err.hint(), None);
}

#[test]
fn malformed_multi_line_error_location_and_hint() {
    let c = Comment {
        text: "/*\n TODO: x\n*/".to_string(),
        filename: "a.c".to_string(),
        lines: vec!["/*\n".into(), " TODO: x\n".into(), "*/\n".into()],
        line_no: 3,
    };
    let err = TodoError::malformed(&c);
    assert_eq!(
        err.source_location(),
        "a.c:3: /*\n\
         a.c:4:  TODO: x\n\
         a.c:5: */\n"
    );
    assert_eq!(err.hint(), Some(MALFORMED_HINT));
}

#[test]
fn json_shape() {
    let closed = TodoError::issue_non_existent(&comment("// TODO 9: x"), "9");
    let value = serde_json::to_value(closed.to_json()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "type": "Issue doesn't exist",
            "filename": "main.go",
            "line": 7,
            "message": "",
            "metadata": {"issueID": "9"}
        })
    );

    let malformed = TodoError::malformed(&comment("// TODO: x"));
    let value = serde_json::to_value(malformed.to_json()).unwrap();
    assert_eq!(value["message"], MALFORMED_HINT);
    assert_eq!(value["metadata"], serde_json::json!({}));
}
