/// Character-level comment extraction.
///
/// Every dialect is a four-state machine driven one character at a time over
/// a `(prev, curr, next)` window. Transitions accumulate the comment text and
/// hand each completed comment to the caller's `emit` callback.
mod groovy;
mod nim;
mod php;
mod python;
mod scripts;
mod standard;
mod traverser;
mod twig;
mod vue;

pub use traverser::CommentTraverser;

use crate::error::Error;
use crate::language::Dialect;

use groovy::Groovy;
use nim::Nim;
use php::Php;
use python::Python;
use scripts::Scripts;
use standard::Standard;
use twig::Twig;
use vue::Vue;

/// Fed as `next` at the end of every line. Never part of a comment.
pub const SENTINEL: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentState {
    #[default]
    NonComment,
    InString,
    SingleLineComment,
    MultiLineComment,
}

/// The rolling three-character window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens {
    pub prev: char,
    pub curr: char,
    pub next: char,
}

impl Tokens {
    pub const EMPTY: Tokens = Tokens {
        prev: SENTINEL,
        curr: SENTINEL,
        next: SENTINEL,
    };

    pub fn shift(&mut self, ch: char) {
        self.prev = self.curr;
        self.curr = self.next;
        self.next = ch;
    }

    fn is_triple(self, token: char) -> bool {
        self.prev == token && self.curr == token && self.next == token
    }
}

/// Where the current token sits: the file, the physical line it came from
/// (with its line ending) and the 1-based line number.
#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    pub filename: &'a str,
    pub line: &'a str,
    pub line_no: usize,
}

/// A completed comment: its raw text including delimiters, the source lines it
/// spans and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub filename: String,
    pub lines: Vec<String>,
    pub line_no: usize,
}

/// Callback receiving completed comments. An error aborts the traversal.
pub type Emit<'e> = dyn FnMut(Comment) -> Result<(), Error> + 'e;

pub type Step = Result<CommentState, Error>;

/// The in-flight comment.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    buffer: String,
    lines: Vec<String>,
    start_line: usize,
}

impl Accumulator {
    pub fn push(&mut self, ch: char) {
        if ch != SENTINEL {
            self.buffer.push(ch);
        }
    }

    pub fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Record the opening line of a multi-line comment.
    pub fn begin(&mut self, at: &Position<'_>) {
        self.lines = vec![at.line.to_owned()];
        self.start_line = at.line_no;
    }

    /// The first token of every line after the opener arrives with
    /// `prev == '\n'`; that is when its line joins the span.
    pub fn track_line(&mut self, at: &Position<'_>, t: Tokens) {
        if t.prev == '\n' {
            self.lines.push(at.line.to_owned());
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn ends_with(&self, delimiter: &str) -> bool {
        self.buffer.ends_with(delimiter)
    }

    /// Complete a single-line comment on the current line.
    pub fn finish_line(&mut self, at: &Position<'_>) -> Comment {
        let text = std::mem::take(&mut self.buffer);
        self.clear();
        Comment {
            text,
            filename: at.filename.to_owned(),
            lines: vec![at.line.to_owned()],
            line_no: at.line_no,
        }
    }

    /// Complete a multi-line comment started by `begin`.
    pub fn finish_block(&mut self, at: &Position<'_>) -> Comment {
        let comment = Comment {
            text: std::mem::take(&mut self.buffer),
            filename: at.filename.to_owned(),
            lines: std::mem::take(&mut self.lines),
            line_no: self.start_line,
        };
        self.clear();
        comment
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.lines.clear();
        self.start_line = 0;
    }
}

/// The per-state transitions of one comment grammar.
pub(crate) trait DialectFsm {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step;
    fn string(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step;
    fn single_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step;
    fn multi_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step;

    /// Drop any in-flight comment and sub-state.
    fn reset(&mut self);
}

/// Accumulate until the end of the line, then emit a one-line comment.
pub(crate) fn single_line(
    acc: &mut Accumulator,
    at: &Position<'_>,
    t: Tokens,
    emit: &mut Emit<'_>,
) -> Step {
    if t.curr == '\n' {
        emit(acc.finish_line(at))?;
        return Ok(CommentState::NonComment);
    }
    acc.push(t.curr);
    Ok(CommentState::SingleLineComment)
}

/// A string ends on its opening quote unless that quote is escaped.
pub(crate) fn quoted_string(token: char, t: Tokens) -> CommentState {
    if t.prev != '\\' && t.curr == token {
        CommentState::NonComment
    } else {
        CommentState::InString
    }
}

fn drive<F: DialectFsm>(
    fsm: &mut F,
    state: CommentState,
    at: &Position<'_>,
    t: Tokens,
    emit: &mut Emit<'_>,
) -> Step {
    match state {
        CommentState::NonComment => fsm.non_comment(at, t, emit),
        CommentState::InString => fsm.string(at, t, emit),
        CommentState::SingleLineComment => fsm.single_line_comment(at, t, emit),
        CommentState::MultiLineComment => fsm.multi_line_comment(at, t, emit),
    }
}

/// One state machine per dialect, selected from the language registry.
#[derive(Debug)]
pub enum CommentMatcher {
    Standard(Standard),
    Python(Python),
    Groovy(Groovy),
    Nim(Nim),
    Scripts(Scripts),
    Php(Php),
    Vue(Vue),
    Twig(Twig),
}

macro_rules! dispatch {
    ($matcher:expr, $fsm:ident => $body:expr) => {
        match $matcher {
            CommentMatcher::Standard($fsm) => $body,
            CommentMatcher::Python($fsm) => $body,
            CommentMatcher::Groovy($fsm) => $body,
            CommentMatcher::Nim($fsm) => $body,
            CommentMatcher::Scripts($fsm) => $body,
            CommentMatcher::Php($fsm) => $body,
            CommentMatcher::Vue($fsm) => $body,
            CommentMatcher::Twig($fsm) => $body,
        }
    };
}

impl CommentMatcher {
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Standard { nested } => CommentMatcher::Standard(Standard::new(nested)),
            Dialect::Python => CommentMatcher::Python(Python::default()),
            Dialect::Groovy => CommentMatcher::Groovy(Groovy::default()),
            Dialect::Nim => CommentMatcher::Nim(Nim::default()),
            Dialect::Scripts => CommentMatcher::Scripts(Scripts::default()),
            Dialect::Php => CommentMatcher::Php(Php::default()),
            Dialect::Vue => CommentMatcher::Vue(Vue::default()),
            Dialect::Twig => CommentMatcher::Twig(Twig::default()),
        }
    }

    /// Run the transition for `state` over one window.
    pub fn step(
        &mut self,
        state: CommentState,
        at: &Position<'_>,
        t: Tokens,
        emit: &mut Emit<'_>,
    ) -> Step {
        dispatch!(self, fsm => drive(fsm, state, at, t, emit))
    }
}

/// Run `src` through a fresh traverser as file `path` and collect what it emits.
#[cfg(test)]
pub(crate) fn collect_comments(path: &str, src: &str) -> Vec<Comment> {
    let logger = crate::logging::NoopLogger;
    let mut traverser = CommentTraverser::new(&logger);
    let mut out = Vec::new();
    for (idx, line) in src.split_inclusive('\n').enumerate() {
        traverser
            .visit_line(path, line, idx + 1, &mut |c| {
                out.push(c);
                Ok(())
            })
            .unwrap();
    }
    traverser.finish();
    out
}

#[cfg(test)]
pub(crate) fn comment_texts(path: &str, src: &str) -> Vec<String> {
    collect_comments(path, src)
        .into_iter()
        .map(|c| c.text)
        .collect()
}
