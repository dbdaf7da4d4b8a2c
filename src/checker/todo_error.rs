use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::comments::Comment;

pub const MALFORMED_HINT: &str = "TODO should match pattern - TODO {task_id}:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoErrorKind {
    Malformed,
    IssueClosed,
    IssueNonExistent,
}

impl TodoErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoErrorKind::Malformed => "Malformed todo",
            TodoErrorKind::IssueClosed => "Issue is closed",
            TodoErrorKind::IssueNonExistent => "Issue doesn't exist",
        }
    }
}

impl fmt::Display for TodoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A TODO that fails the check. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoError {
    pub kind: TodoErrorKind,
    pub filename: String,
    /// 1-based line of the comment opener.
    pub line_no: usize,
    /// The source lines the comment spans, line endings included.
    pub lines: Vec<String>,
    pub issue_ref: Option<String>,
}

impl TodoError {
    fn from_comment(kind: TodoErrorKind, comment: &Comment, issue_ref: Option<String>) -> Self {
        Self {
            kind,
            filename: comment.filename.clone(),
            line_no: comment.line_no,
            lines: comment.lines.clone(),
            issue_ref,
        }
    }

    pub fn malformed(comment: &Comment) -> Self {
        Self::from_comment(TodoErrorKind::Malformed, comment, None)
    }

    pub fn issue_closed(comment: &Comment, issue_ref: &str) -> Self {
        Self::from_comment(TodoErrorKind::IssueClosed, comment, Some(issue_ref.to_owned()))
    }

    pub fn issue_non_existent(comment: &Comment, issue_ref: &str) -> Self {
        Self::from_comment(
            TodoErrorKind::IssueNonExistent,
            comment,
            Some(issue_ref.to_owned()),
        )
    }

    pub fn hint(&self) -> Option<&'static str> {
        (self.kind == TodoErrorKind::Malformed).then_some(MALFORMED_HINT)
    }

    /// `file:line: source` for every spanned line.
    pub fn source_location(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}:{}: {}", self.filename, self.line_no + i, line))
            .collect()
    }

    pub fn to_json(&self) -> TodoErrorJson<'_> {
        let mut metadata = BTreeMap::new();
        if let Some(issue_ref) = &self.issue_ref {
            metadata.insert("issueID", issue_ref.as_str());
        }
        TodoErrorJson {
            kind: self.kind.as_str(),
            filename: &self.filename,
            line: self.line_no,
            message: self.hint().unwrap_or_default(),
            metadata,
        }
    }
}

/// Machine-readable form of a `TodoError`.
#[derive(Debug, Serialize)]
pub struct TodoErrorJson<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub filename: &'a str,
    pub line: usize,
    pub message: &'static str,
    pub metadata: BTreeMap<&'static str, &'a str>,
}
