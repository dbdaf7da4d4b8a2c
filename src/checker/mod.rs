/// Decides whether a completed comment is a reportable TODO error.
pub(crate) mod todo_error;

pub use todo_error::{TodoError, TodoErrorJson};

use crate::comments::Comment;
use crate::error::{Error, FetchError};
use crate::logging::Logger;
use crate::todos::MatchTodo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Open,
    Closed,
    NonExistent,
}

/// Resolves an issue reference to its status.
pub trait IssueStatusSource {
    fn fetch(&mut self, issue_ref: &str) -> Result<TaskStatus, FetchError>;
}

impl<S: IssueStatusSource + ?Sized> IssueStatusSource for &mut S {
    fn fetch(&mut self, issue_ref: &str) -> Result<TaskStatus, FetchError> {
        (**self).fetch(issue_ref)
    }
}

pub struct Checker<'l, S> {
    source: S,
    logger: &'l dyn Logger,
}

impl<'l, S: IssueStatusSource> Checker<'l, S> {
    pub fn new(source: S, logger: &'l dyn Logger) -> Self {
        Self { source, logger }
    }

    /// `Ok(None)` for comments that are not TODOs and for TODOs whose issue is
    /// still open. Only valid TODOs reach the status source.
    pub fn check(
        &mut self,
        matcher: &dyn MatchTodo,
        comment: &Comment,
    ) -> Result<Option<TodoError>, Error> {
        if !matcher.is_match(&comment.text) {
            return Ok(None);
        }
        if !matcher.is_valid(&comment.text) {
            return Ok(Some(TodoError::malformed(comment)));
        }

        let issue_ref = matcher.extract_issue_ref(&comment.text)?;
        let status = self.source.fetch(&issue_ref)?;
        self.logger.debug(format_args!(
            "{}:{}: issue {issue_ref} is {status:?}",
            comment.filename, comment.line_no
        ));

        Ok(match status {
            TaskStatus::Closed => Some(TodoError::issue_closed(comment, &issue_ref)),
            TaskStatus::NonExistent => Some(TodoError::issue_non_existent(comment, &issue_ref)),
            TaskStatus::Open => None,
        })
    }
}

/// Fixed statuses for tests; counts lookups. Unknown references are open.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticStatuses {
    pub statuses: std::collections::HashMap<String, TaskStatus>,
    pub fetches: usize,
}

#[cfg(test)]
impl StaticStatuses {
    pub fn with(pairs: &[(&str, TaskStatus)]) -> Self {
        Self {
            statuses: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            fetches: 0,
        }
    }
}

#[cfg(test)]
impl IssueStatusSource for StaticStatuses {
    fn fetch(&mut self, issue_ref: &str) -> Result<TaskStatus, FetchError> {
        self.fetches += 1;
        Ok(self
            .statuses
            .get(issue_ref)
            .copied()
            .unwrap_or(TaskStatus::Open))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
