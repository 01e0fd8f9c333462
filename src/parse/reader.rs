use crate::{
    foundation::{
        core::Vec2,
        error::{ParseError, ParseErrorKind},
    },
    parse::cursor::Cursor,
};

impl Cursor {
    /// Skip spaces, and newlines too when `newlines` is set.
    pub fn skip_whitespace(&mut self, newlines: bool) {
        while let Some(c) = self.peek() {
            if c == b' ' || (newlines && c == b'\n') {
                // Cannot fail: peek just returned a byte.
                let _ = self.advance();
            } else {
                return;
            }
        }
    }

    /// Require `literal` at the cursor and move past it.
    pub fn expect_literal(&mut self, literal: &str) -> Result<(), ParseError> {
        if !self.rest().starts_with(literal.as_bytes()) {
            return Err(self.error(ParseErrorKind::Expected(literal.to_string())));
        }
        self.advance_by(literal.len())
    }

    /// Consume `word` only if it is present and not followed by an ASCII
    /// letter or digit. The cursor is left untouched otherwise.
    pub fn check_keyword(&mut self, word: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(word.as_bytes()) {
            return false;
        }
        if rest
            .get(word.len())
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            return false;
        }
        self.advance_by(word.len()).is_ok()
    }

    /// `-?[0-9]+(\.[0-9]*)?`
    ///
    /// Digits are accumulated one at a time; the sign is applied last.
    pub fn read_number(&mut self) -> Result<f64, ParseError> {
        let negative = self.peek() == Some(b'-');
        if negative {
            self.advance()?;
        }

        let mut value = 0.0f64;
        let mut any_digit = false;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            self.advance()?;
            any_digit = true;
            value = value * 10.0 + f64::from(c - b'0');
        }
        if !any_digit {
            return Err(self.error(ParseErrorKind::NumberExpected));
        }

        if self.peek() == Some(b'.') {
            self.advance()?;
            let mut scale = 0.1f64;
            while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
                self.advance()?;
                value += f64::from(c - b'0') * scale;
                scale *= 0.1;
            }
        }

        Ok(if negative { -value } else { value })
    }

    /// `<number> , <number>` with optional spaces around the comma.
    pub fn read_vec2(&mut self) -> Result<Vec2, ParseError> {
        let x = self.read_number()?;
        self.skip_whitespace(false);
        self.expect_literal(",")?;
        self.skip_whitespace(false);
        let y = self.read_number()?;
        Ok(Vec2::new(x, y))
    }

    /// Text between double quotes. There are no escape sequences.
    pub fn read_quoted_string(&mut self) -> Result<String, ParseError> {
        let opened_at = self.position();
        self.expect_literal("\"")?;

        let start = self.position().offset;
        while let Some(c) = self.peek() {
            if c == b'"' {
                let end = self.position().offset;
                let s = self.slice(start, end).to_string();
                self.advance()?;
                return Ok(s);
            }
            self.advance()?;
        }

        Err(self.error(ParseErrorKind::UnterminatedString { opened_at }))
    }

    /// `= <number>` followed by the end of the line.
    pub fn read_assigned_number(&mut self) -> Result<f64, ParseError> {
        self.read_assigned(Self::read_number)
    }

    /// `= <number>, <number>` followed by the end of the line.
    pub fn read_assigned_vec2(&mut self) -> Result<Vec2, ParseError> {
        self.read_assigned(Self::read_vec2)
    }

    fn read_assigned<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.skip_whitespace(false);
        self.expect_literal("=")?;
        self.skip_whitespace(false);
        let value = read(self)?;
        self.skip_whitespace(false);
        self.expect_literal("\n")?;
        Ok(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/reader.rs"]
mod tests;
