/// TODO recognition inside completed comments.
///
/// A comment *matches* when it carries a TODO keyword anywhere after its
/// opener. It is *valid* when it reads `<opener> TODO <issue>: ...` for line
/// comments, or has `TODO <issue>:` somewhere in a block comment.
use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::language::Dialect;

pub const DEFAULT_KEYWORD: &str = "TODO";

const ISSUE_REF: &str = r"#?[a-zA-Z0-9\-]+";

pub trait MatchTodo {
    fn is_match(&self, comment: &str) -> bool;
    fn is_valid(&self, comment: &str) -> bool;
    /// The issue reference of a valid TODO. Calling this on a comment that is
    /// not valid yields `Error::InvalidTodo`.
    fn extract_issue_ref(&self, comment: &str) -> Result<String, Error>;
}

#[derive(Debug)]
struct Pattern {
    loose: Regex,
    valid: Regex,
}

/// Regex-backed matcher for one dialect and one keyword set.
#[derive(Debug)]
pub struct TodoMatcher {
    patterns: Vec<Pattern>,
}

/// Regex fragments for the line and block comment openers of a dialect.
fn openers(dialect: Dialect) -> (&'static [&'static str], &'static [&'static str]) {
    match dialect {
        Dialect::Standard { .. } | Dialect::Groovy => (&["//"], &[r"/\*"]),
        Dialect::Python => (&["#"], &[r#"(?:"""|''')"#]),
        Dialect::Nim => (&["#"], &[r"#\["]),
        Dialect::Scripts => (&["#"], &[]),
        Dialect::Php => (&["//", "#"], &[r"/\*"]),
        Dialect::Vue => (&["//"], &[r"/\*", "<!--"]),
        Dialect::Twig => (&[], &[r"\{#", "<!--"]),
    }
}

/// `TODO` plus the configured extras as a non-capturing alternation.
fn keyword_alternation(custom: &[String]) -> String {
    let mut keywords = vec![DEFAULT_KEYWORD];
    for kw in custom {
        if !kw.is_empty() && !keywords.contains(&kw.as_str()) {
            keywords.push(kw.as_str());
        }
    }
    let escaped: Vec<String> = keywords.iter().map(|kw| regex::escape(kw)).collect();
    format!("(?:{})", escaped.join("|"))
}

impl TodoMatcher {
    pub fn new(dialect: Dialect, custom_todos: &[String]) -> Result<Self, Error> {
        let kw = keyword_alternation(custom_todos);
        let (line, block) = openers(dialect);

        let mut patterns = Vec::with_capacity(line.len() + block.len());
        for open in line {
            patterns.push(Pattern {
                loose: Regex::new(&format!(r"^\s*{open}.*{kw}"))?,
                valid: Regex::new(&format!(r"^\s*{open} {kw} ({ISSUE_REF}):.*"))?,
            });
        }
        for open in block {
            patterns.push(Pattern {
                loose: Regex::new(&format!(r"(?s)^\s*{open}.*{kw}"))?,
                valid: Regex::new(&format!(r"(?s)^\s*{open}.*{kw} ({ISSUE_REF}):.*"))?,
            });
        }
        Ok(Self { patterns })
    }
}

impl MatchTodo for TodoMatcher {
    fn is_match(&self, comment: &str) -> bool {
        self.patterns.iter().any(|p| p.loose.is_match(comment))
    }

    fn is_valid(&self, comment: &str) -> bool {
        self.patterns.iter().any(|p| p.valid.is_match(comment))
    }

    fn extract_issue_ref(&self, comment: &str) -> Result<String, Error> {
        self.patterns
            .iter()
            .find_map(|p| p.valid.captures(comment))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
            .ok_or_else(|| Error::InvalidTodo(comment.to_owned()))
    }
}

static ANY_CASE_TODO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[Tt][Oo][Dd][Oo]").expect("static pattern compiles"));

/// Upper-cases every spelling of "todo" before delegating, so `// todo 1: x`
/// is checked like `// TODO 1: x`.
#[derive(Debug)]
pub struct CaseInsensitive<M> {
    inner: M,
}

impl<M: MatchTodo> CaseInsensitive<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    fn normalize(comment: &str) -> Cow<'_, str> {
        ANY_CASE_TODO.replace_all(comment, DEFAULT_KEYWORD)
    }
}

impl<M: MatchTodo> MatchTodo for CaseInsensitive<M> {
    fn is_match(&self, comment: &str) -> bool {
        self.inner.is_match(&Self::normalize(comment))
    }

    fn is_valid(&self, comment: &str) -> bool {
        self.inner.is_valid(&Self::normalize(comment))
    }

    fn extract_issue_ref(&self, comment: &str) -> Result<String, Error> {
        self.inner.extract_issue_ref(&Self::normalize(comment))
    }
}

/// The matcher the checker uses for `dialect`, honouring the case setting.
pub fn matcher_for(
    dialect: Dialect,
    custom_todos: &[String],
    case_sensitive: bool,
) -> Result<Box<dyn MatchTodo>, Error> {
    let matcher = TodoMatcher::new(dialect, custom_todos)?;
    if case_sensitive {
        Ok(Box::new(matcher))
    } else {
        Ok(Box::new(CaseInsensitive::new(matcher)))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
