use crate::foundation::{
    core::Position,
    error::{ParseError, ParseErrorKind},
};

/// Position-tracking cursor over configuration text.
///
/// The text is treated as bytes. Advancing over `\n` moves to column 1 of the
/// next line; any other byte moves one column right.
#[derive(Clone, Debug)]
pub struct Cursor {
    text: String,
    pos: Position,
}

impl Cursor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: Position::start(),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos.offset >= self.text.len()
    }

    /// Current byte, or `None` at end of input.
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos.offset).copied()
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &[u8] {
        &self.text.as_bytes()[self.pos.offset..]
    }

    pub fn advance(&mut self) -> Result<u8, ParseError> {
        let c = self
            .peek()
            .ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))?;
        self.pos.offset += 1;
        if c == b'\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Ok(c)
    }

    pub fn advance_by(&mut self, count: usize) -> Result<(), ParseError> {
        for _ in 0..count {
            self.advance()?;
        }
        Ok(())
    }

    /// Input between two byte offsets previously observed on this cursor.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or_default()
    }

    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/cursor.rs"]
mod tests;
