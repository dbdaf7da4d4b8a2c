/// Vue single-file components: `//` in scripts, `/* */` in scripts and
/// styles, `<!-- -->` in templates.
use super::{
    quoted_string, single_line, Accumulator, CommentState, DialectFsm, Emit, Position, Step,
    Tokens,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Css,
    Html,
}

#[derive(Debug)]
pub struct Vue {
    acc: Accumulator,
    string_token: char,
    block: Block,
    /// `<!` was seen with a `-` ahead.
    starting_html: bool,
}

impl Default for Vue {
    fn default() -> Self {
        Self {
            acc: Accumulator::default(),
            string_token: '"',
            block: Block::Css,
            starting_html: false,
        }
    }
}

impl DialectFsm for Vue {
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
            (_, '/', '/') => {
                self.acc.push('/');
                Ok(CommentState::SingleLineComment)
            }
            (_, '/', '*') => {
                self.acc.push('/');
                self.acc.begin(at);
                self.block = Block::Css;
                Ok(CommentState::MultiLineComment)
            }
            ('<', '!', '-') => {
                self.starting_html = true;
                Ok(CommentState::NonComment)
            }
            (_, '"' | '\'', _) => {
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
        let closed = match self.block {
            Block::Css => self.acc.len() >= 4 && self.acc.ends_with("*/"),
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
#[path = "vue_test.rs"]
mod tests;
