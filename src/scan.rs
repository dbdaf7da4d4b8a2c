use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use crate::checker::{Checker, IssueStatusSource, TodoError};
use crate::comments::{Comment, CommentTraverser};
use crate::error::Error;
use crate::language::{self, Dialect};
use crate::logging::Logger;
use crate::todos::{self, MatchTodo};
use crate::walk::{self, IgnoredPaths};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub ignored: Vec<String>,
    pub custom_todos: Vec<String>,
    pub case_sensitive: bool,
}

/// Walk `root`, check every comment of every supported file and return the
/// findings in traversal order.
pub fn scan<S: IssueStatusSource>(
    root: &Path,
    opts: &ScanOptions,
    source: S,
    logger: &dyn Logger,
) -> Result<Vec<TodoError>, Error> {
    let ignored = IgnoredPaths::new(root, &opts.ignored)?;
    let files = walk::source_files(root, &ignored, logger)?;

    let mut traverser = CommentTraverser::new(logger);
    let mut checker = Checker::new(source, logger);
    let mut matchers: HashMap<Dialect, Box<dyn MatchTodo>> = HashMap::new();
    let mut findings = Vec::new();

    for path in files {
        let Some(spec) = language::detect(&path) else {
            continue;
        };
        let Some(content) = walk::read_source(&path)? else {
            logger.debug(format_args!("{}: binary, skipping", path.display()));
            continue;
        };
        let matcher = match matchers.entry(spec.dialect) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(todos::matcher_for(
                spec.dialect,
                &opts.custom_todos,
                opts.case_sensitive,
            )?),
        };

        let filename = path.display().to_string();
        let mut emit = |comment: Comment| -> Result<(), Error> {
            if let Some(err) = checker.check(&**matcher, &comment)? {
                findings.push(err);
            }
            Ok(())
        };
        for (line_no, line) in walk::numbered_lines(&content) {
            traverser.visit_line(&filename, &line, line_no, &mut emit)?;
        }
        traverser.finish();
    }

    Ok(findings)
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
