/// PHP: `//` and `#` line comments, `/* */` blocks.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug)]
pub struct Php {
    acc: Accumulator,
    string_token: char,
}

impl Default for Php {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
        }
    }
}

impl DialectFsm for Php {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match (t.curr, t.next) {
            ('/', '/') | ('#', _) => {
                self.acc.push(t.curr);
                Ok(CommentState::SingleLineComment)
            }
            ('/', '*') => {
                self.acc.push('/');
                self.acc.begin(at);
                Ok(CommentState::MultiLineComment)
            }
            ('"' | '\'', _) => {
                self.string_token = t.curr;
                Ok(CommentState::InString)
            }
            _ => Ok(CommentState::NonComment),
        }
    }

    fn string(&mut self, _: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        Ok(quoted_string(self.string_token, t))
    }

    fn single_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        single_line(&mut self.acc, at, t, emit)
    }

    fn multi_line_comment(&mut self, at: &Position<'_>, t: Tokens, emit: &mut Emit<'_>) -> Step {
        self.acc.push(t.curr);
        if t.prev == '*' && t.curr == '/' && self.acc.len() >= 4 {
            emit(self.acc.finish_block(at))?;
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
#[path = "php_test.rs"]
mod tests;
