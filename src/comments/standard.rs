/// C-like comments: `//` and `/* */`, optionally nesting.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug)]
pub struct Standard {
    acc: Accumulator,
    nested: bool,
    depth: usize,
    string_token: char,
}

impl Standard {
    pub fn new(nested: bool) -> Self {
        Self {
            acc: Accumulator::default(),
            nested,
            depth: 1,
            string_token: '"',
        }
    }
}

impl DialectFsm for Standard {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match (t.curr, t.next) {
            ('/', '/') => {
                self.acc.push('/');
                Ok(CommentState::SingleLineComment)
            }
            ('/', '*') => {
                self.acc.push('/');
                self.acc.begin(at);
                self.depth = 1;
                Ok(CommentState::MultiLineComment)
            }
            ('"' | '\'' | '`', _) => {
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
        // `/*/` shares its star with the opener and does not close.
        if t.prev == '*' && t.curr == '/' && self.acc.len() >= 4 {
            if self.nested && self.depth > 1 {
                self.depth -= 1;
            } else {
                emit(self.acc.finish_block(at))?;
                self.depth = 1;
                return Ok(CommentState::NonComment);
            }
        } else if self.nested && t.curr == '/' && t.next == '*' {
            self.depth += 1;
        }

        self.acc.track_line(at, t);
        Ok(CommentState::MultiLineComment)
    }

    fn reset(&mut self) {
        *self = Self::new(self.nested);
    }
}

#[cfg(test)]
#[path = "standard_test.rs"]
mod tests;
