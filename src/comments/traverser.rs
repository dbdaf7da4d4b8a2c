use std::path::Path;

use super::{CommentMatcher, CommentState, Emit, Position, SENTINEL, Tokens};
use crate::error::Error;
use crate::language;
use crate::logging::Logger;

/// Feeds the lines of one file after another through the matcher of each
/// file's dialect.
///
/// The window runs one character behind the input: `next` is the character
/// just read, `curr` the one being classified. At the end of each line the
/// sentinel is shifted in so the line's last character gets classified too.
pub struct CommentTraverser<'l> {
    logger: &'l dyn Logger,
    filename: Option<String>,
    matcher: Option<CommentMatcher>,
    state: CommentState,
    window: Tokens,
    skip_next: bool,
}

impl<'l> CommentTraverser<'l> {
    pub fn new(logger: &'l dyn Logger) -> Self {
        Self {
            logger,
            filename: None,
            matcher: None,
            state: CommentState::NonComment,
            window: Tokens::EMPTY,
            skip_next: false,
        }
    }

    /// Classify one physical line. `line` keeps its line ending; a missing
    /// final `\n` is supplied.
    pub fn visit_line(
        &mut self,
        filename: &str,
        line: &str,
        line_no: usize,
        emit: &mut Emit<'_>,
    ) -> Result<(), Error> {
        if self.filename.as_deref() != Some(filename) {
            self.enter_file(filename);
        }
        if self.matcher.is_none() {
            return Ok(());
        }

        let at = Position {
            filename,
            line,
            line_no,
        };
        for ch in line.chars() {
            self.advance(ch, &at, emit)?;
        }
        if !line.ends_with('\n') {
            self.advance('\n', &at, emit)?;
        }
        self.advance(SENTINEL, &at, emit)
    }

    /// Close the current file. A comment still open here never terminated and
    /// is dropped.
    pub fn finish(&mut self) {
        if let Some(filename) = self.filename.take()
            && self.matcher.is_some()
            && self.state != CommentState::NonComment
        {
            self.logger.debug(format_args!(
                "{filename}: dropping unterminated {:?} at end of file",
                self.state
            ));
        }
        self.matcher = None;
        self.state = CommentState::NonComment;
        self.window = Tokens::EMPTY;
    }

    fn enter_file(&mut self, filename: &str) {
        self.finish();
        self.filename = Some(filename.to_owned());
        self.skip_next = true;
        self.matcher = match language::detect(Path::new(filename)) {
            Some(spec) => {
                self.logger.debug(format_args!(
                    "{filename}: reading as {} ({} comments)",
                    spec.name,
                    spec.dialect.name()
                ));
                Some(CommentMatcher::for_dialect(spec.dialect))
            }
            None => {
                self.logger
                    .debug(format_args!("{filename}: unsupported extension, skipping"));
                None
            }
        };
    }

    fn advance(&mut self, ch: char, at: &Position<'_>, emit: &mut Emit<'_>) -> Result<(), Error> {
        self.window.shift(ch);
        // The first shift of a file only loads `next`.
        if std::mem::take(&mut self.skip_next) {
            return Ok(());
        }
        let Some(matcher) = self.matcher.as_mut() else {
            return Ok(());
        };
        self.state = matcher.step(self.state, at, self.window, emit)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "traverser_test.rs"]
mod tests;
