//! Cursor-based lexer over a fully loaded JSON source.
//!
//! Overview
//! - The lexer owns a `&'src str` and a byte cursor. `None` is the exhausted
//!   sentinel; `Some(source.len())` means "at the end, EOF not yet reported".
//!   The cursor only moves forward while scanning and only moves back when a
//!   [`Lookahead`] guard restores its snapshot.
//! - Token classes come from a [`TokenClassifier`]. The lexer itself knows
//!   whitespace, quotes and backslashes, and nothing else.
//!
//! Strings
//! - Object keys and string values rarely contain escapes. The fast path
//!   finds the next `"` with `memchr`, then re-scans exactly that span for a
//!   backslash. Only when none is found is the span trusted and returned as a
//!   borrowed slice. A backslash sends the whole string to the escape-aware
//!   slow path in `strings.rs`, starting from the original position.
//! - The closing-quote candidate may be an escaped quote; the second scan is
//!   what makes the optimistic result safe, so it is never skipped.
//!
//! Lookahead
//! - [`Lookahead`] snapshots the cursor and the peeked-string cache and puts
//!   both back when dropped. Discriminator sniffing runs entirely inside one.

mod lookahead;
mod strings;
mod values;

pub use lookahead::Lookahead;
use tracing::{debug, trace};

use crate::{
    capture::Capture,
    chunk_utils::chunks,
    error::{ExpectedToken, LexerError, SyntaxError},
    options::LexerOptions,
    token::{BOM, JsonClassifier, STRING, TokenClass, TokenClassifier},
};

/// A single-document JSON lexer over an in-memory string.
///
/// One lexer is created per parse and dropped afterwards. It is not meant to
/// be shared between threads; the source it borrows may be shared freely.
///
/// # Examples
///
/// ```rust
/// use jsonlex::{StringJsonLexer, TokenClass};
///
/// let mut lexer = StringJsonLexer::new(r#"{"id": 7}"#);
/// assert_eq!(lexer.consume_next_token(), TokenClass::BeginObject);
/// assert_eq!(lexer.consume_key_string().unwrap(), "id");
/// lexer.consume_next_token_expected(':').unwrap();
/// assert_eq!(lexer.consume_numeric_literal().unwrap(), 7);
/// assert_eq!(lexer.consume_next_token(), TokenClass::EndObject);
/// assert_eq!(lexer.consume_next_token(), TokenClass::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct StringJsonLexer<'src, C = JsonClassifier> {
    source: &'src str,
    position: Option<usize>,
    peeked: Option<Capture<'src>>,
    classifier: C,
    options: LexerOptions,
}

impl<'src> StringJsonLexer<'src> {
    /// Creates a lexer with default options and the RFC 8259 classifier.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    /// Creates a lexer with the RFC 8259 classifier.
    #[must_use]
    pub fn with_options(source: &'src str, options: LexerOptions) -> Self {
        Self::with_classifier(source, options, JsonClassifier)
    }
}

impl<'src, C: TokenClassifier> StringJsonLexer<'src, C> {
    /// Creates a lexer that classifies tokens with `classifier`.
    ///
    /// A leading byte-order mark is skipped here, once.
    pub fn with_classifier(source: &'src str, options: LexerOptions, classifier: C) -> Self {
        let position = if source.starts_with(BOM) {
            BOM.len_utf8()
        } else {
            0
        };
        Self {
            source,
            position: Some(position),
            peeked: None,
            classifier,
            options,
        }
    }

    /// The source being scanned.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset, or `None` once the input has been reported
    /// exhausted.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Options the lexer was created with.
    #[must_use]
    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    // --------------------------------------------------------------------------------------------
    // Cursor & whitespace
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn offset(&self) -> usize {
        self.position.unwrap_or(self.source.len())
    }

    #[inline]
    fn char_at(&self, at: usize) -> Option<char> {
        self.source.get(at..)?.chars().next()
    }

    #[inline]
    fn is_ws(&self, c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
            || (self.options.allow_unicode_whitespace && c.is_whitespace())
    }

    /// Characters that continue an unquoted lenient token.
    #[inline]
    fn is_lenient_char(&self, c: char) -> bool {
        self.classifier.classify(c) == TokenClass::Other && !self.is_ws(c)
    }

    /// First non-whitespace offset at or after `at`.
    fn skip_ws_from(&self, mut at: usize) -> usize {
        let bytes = self.source.as_bytes();
        while let Some(&b) = bytes.get(at) {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => at += 1,
                b if b < 0x80 || !self.options.allow_unicode_whitespace => break,
                _ => match self.char_at(at) {
                    Some(c) if c.is_whitespace() => at += c.len_utf8(),
                    _ => break,
                },
            }
        }
        at
    }

    /// End of the run of lenient characters starting at `from`.
    fn lenient_run_end(&self, from: usize) -> usize {
        self.source
            .get(from..)
            .and_then(|rest| rest.char_indices().find(|&(_, c)| !self.is_lenient_char(c)))
            .map_or(self.source.len(), |(i, _)| from + i)
    }

    /// Advances past whitespace and returns the new position.
    ///
    /// Returns `None` without scanning when the input is already exhausted.
    /// Calling it twice in a row leaves the cursor where the first call put it.
    pub fn skip_whitespaces(&mut self) -> Option<usize> {
        let current = self.skip_ws_from(self.position?);
        self.position = Some(current);
        Some(current)
    }

    /// Whether the next token can start a value.
    ///
    /// Whitespace is skipped, the token itself is not consumed. Returns
    /// `false` at EOF and never fails.
    pub fn can_consume_value(&mut self) -> bool {
        let Some(current) = self.skip_whitespaces() else {
            return false;
        };
        self.char_at(current)
            .is_some_and(|c| self.classifier.is_valid_value_start(c))
    }

    // --------------------------------------------------------------------------------------------
    // Token consumption
    // --------------------------------------------------------------------------------------------

    /// Consumes one token and returns its class.
    ///
    /// End of input is a token, not an error: the cursor is parked at
    /// `source.len()` and [`TokenClass::Eof`] is returned.
    pub fn consume_next_token(&mut self) -> TokenClass {
        if let Some(current) = self.position {
            let at = self.skip_ws_from(current);
            if let Some(c) = self.char_at(at) {
                self.position = Some(at + c.len_utf8());
                return self.classifier.classify(c);
            }
        }
        self.position = Some(self.source.len());
        TokenClass::Eof
    }

    /// Consumes one token that must be exactly `expected`.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedToken`] when another character is found and
    /// [`SyntaxError::UnexpectedEndOfInput`] when the input ends first.
    pub fn consume_next_token_expected(&mut self, expected: char) -> Result<(), LexerError> {
        let found = self.position.and_then(|current| {
            let at = self.skip_ws_from(current);
            self.char_at(at).map(|c| (at, c))
        });
        match found {
            Some((at, c)) => {
                self.position = Some(at + c.len_utf8());
                if c == expected {
                    Ok(())
                } else {
                    Err(self.unexpected_token(expected, at, c))
                }
            }
            None => {
                // Exhausted, so EOF is reported against the end of the source.
                self.position = None;
                Err(self.error(
                    SyntaxError::UnexpectedEndOfInput {
                        expected: self.expected_char(expected),
                    },
                    self.source.len(),
                ))
            }
        }
    }

    /// Consumes one token that must be of class `expected` and returns it.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedToken`] when a token of another class is
    /// found and [`SyntaxError::UnexpectedEndOfInput`] when the input ends
    /// first. Expecting [`TokenClass::Eof`] at the end succeeds.
    pub fn consume_next_token_class(
        &mut self,
        expected: TokenClass,
    ) -> Result<TokenClass, LexerError> {
        let at = self
            .position
            .map_or(self.source.len(), |current| self.skip_ws_from(current));
        let found = self.consume_next_token();
        if found == expected {
            return Ok(found);
        }
        let expected = ExpectedToken::class(expected);
        match self.char_at(at) {
            Some(found) => Err(self.error(SyntaxError::UnexpectedToken { expected, found }, at)),
            None => {
                self.position = None;
                Err(self.error(
                    SyntaxError::UnexpectedEndOfInput { expected },
                    self.source.len(),
                ))
            }
        }
    }

    /// Returns the class of the next token without consuming it.
    ///
    /// Whitespace before it is consumed. At EOF the cursor becomes the
    /// exhausted sentinel.
    pub fn peek_next_token(&mut self) -> TokenClass {
        if let Some(current) = self.position {
            let at = self.skip_ws_from(current);
            if let Some(c) = self.char_at(at) {
                self.position = Some(at);
                return self.classifier.classify(c);
            }
        }
        self.position = None;
        TokenClass::Eof
    }

    /// Consumes a `,` if it is the next token.
    pub fn try_consume_comma(&mut self) -> bool {
        let Some(current) = self.skip_whitespaces() else {
            return false;
        };
        if self.source.as_bytes().get(current) == Some(&b',') {
            self.position = Some(current + 1);
            true
        } else {
            false
        }
    }

    /// Checks that only whitespace remains.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedToken`] naming the first trailing character.
    pub fn expect_eof(&mut self) -> Result<(), LexerError> {
        let at = self.skip_whitespaces().unwrap_or(self.source.len());
        match self.char_at(at) {
            None => Ok(()),
            Some(found) => Err(self.error(
                SyntaxError::UnexpectedToken {
                    expected: ExpectedToken::class(TokenClass::Eof),
                    found,
                },
                at,
            )),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------------------------------

    /// Consumes a quoted string, borrowing it when it contains no escapes.
    ///
    /// # Errors
    ///
    /// Fails when no opening quote is next, when the string is never closed,
    /// or when the slow path finds a malformed escape.
    pub fn consume_key_string(&mut self) -> Result<Capture<'src>, LexerError> {
        self.consume_next_token_expected(STRING)?;
        let current = self.offset();
        let bytes = self.source.as_bytes();
        let Some(quote) = memchr::memchr(b'"', &bytes[current..]) else {
            // Park the cursor after the token that follows the quote; `:` and
            // `,` may be string contents, but the guess is usually right.
            self.position = Some(self.lenient_run_end(current));
            debug!(start = current, "unterminated string");
            return Err(self.error(SyntaxError::UnterminatedString, self.offset()));
        };
        let closing = current + quote;
        // The candidate quote may itself be escaped, so the span must be
        // proven escape-free before it is trusted.
        if let Some(escape) = memchr::memchr(b'\\', &bytes[current..closing]) {
            trace!(
                start = current,
                escape = current + escape,
                "string has escapes, using slow path"
            );
            return self.consume_escaped_string(current, current + escape);
        }
        self.position = Some(closing + 1);
        Ok(Capture::Borrowed(&self.source[current..closing]))
    }

    /// Consumes a quoted string, returning the peeked string if one is cached.
    ///
    /// # Errors
    ///
    /// See [`consume_key_string`](Self::consume_key_string).
    pub fn consume_string(&mut self) -> Result<Capture<'src>, LexerError> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(peeked);
        }
        self.consume_key_string()
    }

    /// Decodes one string and hands it to `consume_chunk` in pieces of at
    /// most [`LexerOptions::string_chunk_size`] bytes, never splitting a
    /// scalar. The pieces concatenate to the decoded string; an empty string
    /// produces no pieces.
    ///
    /// # Errors
    ///
    /// Any failure of [`consume_string`](Self::consume_string) or
    /// [`consume_string_lenient`](Self::consume_string_lenient). Nothing is
    /// emitted on failure.
    pub fn consume_string_chunked<F>(
        &mut self,
        is_lenient: bool,
        mut consume_chunk: F,
    ) -> Result<(), LexerError>
    where
        F: FnMut(&str),
    {
        let decoded = if is_lenient {
            self.consume_string_lenient()?
        } else {
            self.consume_string()?
        };
        trace!(
            len = decoded.len(),
            chunk_size = self.options.string_chunk_size,
            "emitting string chunks"
        );
        for chunk in chunks(&decoded, self.options.string_chunk_size) {
            consume_chunk(chunk);
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    /// Builds a decoder-level failure positioned at the cursor.
    ///
    /// The lexer does not move. The decoder returns the error to abort the
    /// parse, with the same line and column reporting as lexer failures.
    ///
    /// ```rust
    /// use jsonlex::{StringJsonLexer, TokenClass};
    ///
    /// let mut lexer = StringJsonLexer::new("[,1]");
    /// assert_eq!(lexer.consume_next_token(), TokenClass::BeginList);
    /// if lexer.peek_next_token() == TokenClass::Comma {
    ///     let err = lexer.fail("unexpected leading comma");
    ///     assert_eq!(err.to_string(), "unexpected leading comma at 1:2");
    /// }
    /// ```
    #[must_use]
    pub fn fail(&self, message: &'static str) -> LexerError {
        self.error(SyntaxError::Custom(message), self.offset())
    }

    pub(crate) fn error(&self, err: SyntaxError, at: usize) -> LexerError {
        LexerError::new(self.source, err, at)
    }

    fn unexpected_token(&self, expected: char, at: usize, found: char) -> LexerError {
        if expected == STRING && self.source.get(at..self.lenient_run_end(at)) == Some("null") {
            return self.error(SyntaxError::NullInsteadOfString, at);
        }
        self.error(
            SyntaxError::UnexpectedToken {
                expected: self.expected_char(expected),
                found,
            },
            at,
        )
    }

    fn expected_char(&self, expected: char) -> ExpectedToken {
        ExpectedToken::exact(expected, self.classifier.classify(expected))
    }
}
