/// Nim: `#` line comments and nestable `#[ ]#` blocks.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug)]
pub struct Nim {
    acc: Accumulator,
    string_token: char,
    depth: usize,
}

impl Default for Nim {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
            depth: 1,
        }
    }
}

impl DialectFsm for Nim {
    fn non_comment(&mut self, at: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match (t.curr, t.next) {
            ('#', '[') => {
                self.acc.push('#');
                self.acc.begin(at);
                self.depth = 1;
                Ok(CommentState::MultiLineComment)
            }
            ('#', _) => {
                self.acc.push('#');
                Ok(CommentState::SingleLineComment)
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
        if t.prev == ']' && t.curr == '#' {
            if self.depth > 1 {
                self.depth -= 1;
            } else {
                emit(self.acc.finish_block(at))?;
                self.depth = 1;
                return Ok(CommentState::NonComment);
            }
        } else if t.curr == '#' && t.next == '[' {
            self.depth += 1;
        }

        self.acc.track_line(at, t);
        Ok(CommentState::MultiLineComment)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "nim_test.rs"]
mod tests;
