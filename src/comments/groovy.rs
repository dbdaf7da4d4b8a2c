/// Groovy: C-like comments, with triple-quoted strings that stay strings.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug)]
pub struct Groovy {
    acc: Accumulator,
    string_token: char,
    multi_line_string: bool,
}

impl Default for Groovy {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
            multi_line_string: false,
        }
    }
}

impl DialectFsm for Groovy {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match (t.curr, t.next) {
            ('/', '/') => {
                self.acc.push('/');
                Ok(CommentState::SingleLineComment)
            }
            ('/', '*') => {
                self.acc.push('/');
                self.acc.begin(at);
                Ok(CommentState::MultiLineComment)
            }
            ('"' | '\'' | '`', _) if t.prev != '\\' => {
                self.string_token = t.curr;
                Ok(CommentState::InString)
            }
            _ => Ok(CommentState::NonComment),
        }
    }

    fn string(&mut self, _: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        if self.multi_line_string {
            // The closing run leaves its last quote to the plain rule below.
            if t.is_triple(self.string_token) {
                self.multi_line_string = false;
            }
            return Ok(CommentState::InString);
        }
        if t.is_triple(self.string_token) {
            self.multi_line_string = true;
            return Ok(CommentState::InString);
        }
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
#[path = "groovy_test.rs"]
mod tests;
