/// Shell-like languages: `#` line comments only.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};
use crate::error::Error;

#[derive(Debug)]
pub struct Scripts {
    acc: Accumulator,
    string_token: char,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
        }
    }
}

impl DialectFsm for Scripts {
    fn non_comment(&mut self, _: &Position<'_>, t: Tokens, _: &mut Emit<'_>) -> Step {
        match t.curr {
            '#' => {
                self.acc.push('#');
                Ok(CommentState::SingleLineComment)
            }
            '"' | '\'' | '`' => {
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

    fn multi_line_comment(&mut self, at: &Position<'_>, _: Tokens, _: &mut Emit<'_>) -> Step {
        Err(Error::Invariant(format!(
            "{}:{}: multi-line comment state reached, but scripts only have single-line comments",
            at.filename, at.line_no
        )))
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "scripts_test.rs"]
mod tests;
