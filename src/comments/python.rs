/// Python: `#` line comments; every triple-quoted string is read as a block
/// comment, docstring or not.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug)]
pub struct Python {
    acc: Accumulator,
    string_token: char,
    /// Set when the closing triple quote was seen; the next token leaves the
    /// comment without being accumulated.
    exiting: bool,
}

impl Default for Python {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
            exiting: false,
        }
    }
}

impl DialectFsm for Python {
    fn non_comment(&mut self, _: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match t.curr {
            '#' if t.prev != '\\' => {
                self.acc.push('#');
                Ok(CommentState::SingleLineComment)
            }
            '"' | '\'' => {
                self.string_token = t.curr;
                Ok(CommentState::InString)
            }
            _ => Ok(CommentState::NonComment),
        }
    }

    fn string(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        if t.is_triple(self.string_token) {
            self.acc.push(t.prev);
            self.acc.push(t.curr);
            self.acc.begin(at);
            return Ok(CommentState::MultiLineComment);
        }
        Ok(quoted_string(self.string_token, t))
    }

    fn single_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        single_line(&mut self.acc, at, t, emit)
    }

    fn multi_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        if self.exiting {
            self.reset();
            return Ok(CommentState::NonComment);
        }

        self.acc.push(t.curr);
        // The closing triple can't reuse a quote of the opening one.
        if self.acc.len() > 4 && t.is_triple(self.string_token) {
            self.acc.push(t.next);
            emit(self.acc.finish_block(at))?;
            self.exiting = true;
            return Ok(CommentState::MultiLineComment);
        }

        self.acc.track_line(at, t);
        Ok(CommentState::MultiLineComment)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "python_test.rs"]
mod tests;
