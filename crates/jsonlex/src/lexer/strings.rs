//! Escape-aware and lenient string decoding.
//!
//! Both paths are correctness-first. The escape-aware decoder is entered only
//! after the fast path found a backslash, and copies the escape-free prefix
//! once before decoding the rest.

use alloc::string::String;

use super::StringJsonLexer;
use crate::{
    capture::Capture,
    error::{ExpectedToken, LexerError, SyntaxError},
    escape_buffer::{UnicodeEscapeBuffer, escape_to_char},
    token::{TokenClass, TokenClassifier},
};

impl<'src, C: TokenClassifier> StringJsonLexer<'src, C> {
    /// Decodes the string whose contents start at `start`, given that the
    /// first backslash sits at `first_escape`. On success the cursor is moved
    /// past the closing quote.
    pub(crate) fn consume_escaped_string(
        &mut self,
        start: usize,
        first_escape: usize,
    ) -> Result<Capture<'src>, LexerError> {
        let source = self.source;
        let bytes = source.as_bytes();
        let mut decoded = String::with_capacity(first_escape - start + 16);
        decoded.push_str(&source[start..first_escape]);

        let mut escapes = UnicodeEscapeBuffer::new();
        let mut current = first_escape;
        loop {
            // `current` is always at a backslash here.
            current = self.append_escape(&mut decoded, &mut escapes, current)?;
            let Some(offset) = memchr::memchr2(b'"', b'\\', &bytes[current..]) else {
                self.position = Some(source.len());
                return Err(self.error(SyntaxError::UnterminatedString, source.len()));
            };
            let next = current + offset;
            decoded.push_str(&source[current..next]);
            if bytes[next] == b'"' {
                self.position = Some(next + 1);
                return Ok(Capture::Owned(decoded));
            }
            current = next;
        }
    }

    /// Decodes the escape whose backslash is at `at` into `decoded` and
    /// returns the offset just past it.
    fn append_escape(
        &self,
        decoded: &mut String,
        escapes: &mut UnicodeEscapeBuffer,
        at: usize,
    ) -> Result<usize, LexerError> {
        let eof = || self.error(SyntaxError::UnterminatedString, self.source.len());
        let mut current = at + 1;
        let c = self.char_at(current).ok_or_else(eof)?;
        if c != 'u' {
            let Some(unescaped) = escape_to_char(c) else {
                return Err(self.error(SyntaxError::InvalidEscape(c), current));
            };
            decoded.push(unescaped);
            return Ok(current + c.len_utf8());
        }

        current += 1;
        let unit = loop {
            let digit = self.char_at(current).ok_or_else(eof)?;
            let unit = escapes.feed(digit).map_err(|e| self.error(e, current))?;
            // Only ASCII hex digits are accepted, so every digit is one byte.
            current += 1;
            if let Some(unit) = unit {
                break unit;
            }
        };

        match escapes.combine(unit).map_err(|e| self.error(e, at))? {
            Some(ch) => {
                decoded.push(ch);
                Ok(current)
            }
            None if self
                .source
                .get(current..)
                .is_some_and(|rest| rest.starts_with("\\u")) =>
            {
                self.append_escape(decoded, escapes, current)
            }
            None => Err(self.error(
                SyntaxError::InvalidUnicodeEscapeSequence(unit.into()),
                at,
            )),
        }
    }

    /// Consumes a string that may be unquoted.
    ///
    /// A quoted string is decoded as by [`consume_string`](Self::consume_string).
    /// Otherwise the maximal run of [`TokenClass::Other`] characters is
    /// returned as a borrowed slice.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedEndOfInput`] at EOF,
    /// [`SyntaxError::ExpectedStringStart`] when punctuation comes next, and
    /// any failure of the quoted path.
    pub fn consume_string_lenient(&mut self) -> Result<Capture<'src>, LexerError> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(peeked);
        }
        let current = self.skip_whitespaces().unwrap_or(self.source.len());
        let Some(c) = self.char_at(current) else {
            return Err(self.error(
                SyntaxError::UnexpectedEndOfInput {
                    expected: ExpectedToken::class(TokenClass::String),
                },
                current,
            ));
        };
        match self.classifier.classify(c) {
            TokenClass::String => return self.consume_string(),
            TokenClass::Other => {}
            _ => return Err(self.error(SyntaxError::ExpectedStringStart(c), current)),
        }
        let end = self.lenient_run_end(current);
        self.position = Some(end);
        Ok(Capture::Borrowed(&self.source[current..end]))
    }
}
