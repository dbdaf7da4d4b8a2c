/// Twig templates: `{# #}` and `<!-- -->` blocks, no strings.
use super::{single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step, Tokens};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Twig,
    Html,
}

#[derive(Debug)]
pub struct Twig {
    acc: Accumulator,
    block: Block,
    starting_html: bool,
}

impl Default for Twig {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            block: Block::Twig,
            starting_html: false,
        }
    }
}

impl DialectFsm for Twig {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        if self.starting_html {
            self.starting_html = false;
            if t.next == '-' {
                self.acc.push_str("<!-");
                self.acc.begin(at);
                self.block = Block::Html;
                return Ok(CommentState::MultiLineComment);
            }
        }

        match (t.prev, t.curr, t.next) {
            ('{', '#', _) => {
                self.acc.push_str("{#");
                self.acc.begin(at);
                self.block = Block::Twig;
                Ok(CommentState::MultiLineComment)
            }
            ('<', '!', '-') => {
                self.starting_html = true;
                Ok(CommentState::NonComment)
            }
            _ => Ok(CommentState::NonComment),
        }
    }

    fn string(&mut self, at: &Position<'_>, _: Tokens, _: &mut Emit<'_>) -> Step {
        Err(Error::Invariant(format!(
            "{}:{}: string state reached, but twig strings are not tracked",
            at.filename, at.line_no
        )))
    }

    fn single_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        single_line(&mut self.acc, at, t, emit)
    }

    fn multi_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        self.acc.push(t.curr);
        let closed = match self.block {
            Block::Twig => self.acc.len() >= 4 && self.acc.ends_with("#}"),
            Block::Html => self.acc.len() >= 7 && self.acc.ends_with("-->"),
        };
        if closed {
            emit(self.acc.finish_block(at))?;
            self.reset();
            return Ok(CommentState::NonComment);
        }

        self.acc.track_line(at, t);
        Ok(CommentState::MultiLineComment)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "twig_test.rs"]
mod tests;
