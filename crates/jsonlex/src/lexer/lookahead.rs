//! Speculative scanning and discriminator sniffing.
//!
//! Every speculative operation runs inside a [`Lookahead`] guard, so the
//! cursor and the peeked-string cache are restored however the scan exits.

use core::ops::{Deref, DerefMut};

use tracing::debug;

use super::StringJsonLexer;
use crate::{
    capture::Capture,
    error::LexerError,
    token::{COLON, JsonClassifier, TokenClass, TokenClassifier},
};

/// Guard for a speculative scan.
///
/// Dereferences to the lexer, so any lexer operation can run through it.
/// Dropping the guard puts the cursor and the peeked-string cache back
/// exactly as they were when [`StringJsonLexer::lookahead`] was called, on
/// every exit path.
///
/// ```rust
/// use jsonlex::{StringJsonLexer, TokenClass};
///
/// let mut lexer = StringJsonLexer::new("[1, 2]");
/// {
///     let mut peek = lexer.lookahead();
///     assert_eq!(peek.consume_next_token(), TokenClass::BeginList);
///     assert_eq!(peek.consume_numeric_literal().unwrap(), 1);
/// }
/// assert_eq!(lexer.position(), Some(0));
/// ```
#[must_use = "dropping the guard restores the cursor immediately"]
pub struct Lookahead<'a, 'src, C = JsonClassifier> {
    lexer: &'a mut StringJsonLexer<'src, C>,
    position: Option<usize>,
    peeked: Option<Capture<'src>>,
}

impl<'src, C> Deref for Lookahead<'_, 'src, C> {
    type Target = StringJsonLexer<'src, C>;

    fn deref(&self) -> &Self::Target {
        self.lexer
    }
}

impl<C> DerefMut for Lookahead<'_, '_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.lexer
    }
}

impl<C> Drop for Lookahead<'_, '_, C> {
    fn drop(&mut self) {
        self.lexer.position = self.position;
        self.lexer.peeked = self.peeked.take();
    }
}

impl<'src, C: TokenClassifier> StringJsonLexer<'src, C> {
    /// Starts a speculative scan; see [`Lookahead`].
    ///
    /// The peeked-string cache is set aside for the duration, so operations
    /// inside the scan never observe a string peeked before it began.
    pub fn lookahead(&mut self) -> Lookahead<'_, 'src, C> {
        let position = self.position;
        let peeked = self.peeked.take();
        Lookahead {
            lexer: self,
            position,
            peeked,
        }
    }

    /// Consumes the next string token and caches it, so that the next
    /// `consume_string*` call returns it without rescanning.
    ///
    /// Returns `Ok(None)` without caching anything when the next token cannot
    /// start a string: strictly only a quote can, leniently an unquoted
    /// character can too.
    ///
    /// # Errors
    ///
    /// Any failure of the string decoder.
    pub fn peek_string(&mut self, is_lenient: bool) -> Result<Option<Capture<'src>>, LexerError> {
        let string = match (self.peek_next_token(), is_lenient) {
            (TokenClass::String, false) => self.consume_string()?,
            (TokenClass::String | TokenClass::Other, true) => self.consume_string_lenient()?,
            _ => return Ok(None),
        };
        self.peeked = Some(string.clone());
        Ok(Some(string))
    }

    /// Drops the string cached by [`peek_string`](Self::peek_string). The
    /// cursor stays past it.
    pub fn discard_peeked(&mut self) {
        self.peeked = None;
    }

    /// Sniffs a leading `"key": "value"` pair without moving the cursor.
    ///
    /// Returns the value when the next token opens an object whose first key
    /// equals `key_to_match` and whose first value is a string. Anything else,
    /// including malformed input, is `None`. The cursor is always left where
    /// it was.
    ///
    /// ```rust
    /// use jsonlex::StringJsonLexer;
    ///
    /// let mut lexer = StringJsonLexer::new(r#"{"type":"A","x":1}"#);
    /// assert_eq!(lexer.peek_leading_matching_value("type", false).unwrap(), "A");
    /// assert_eq!(lexer.peek_leading_matching_value("kind", false), None);
    /// assert_eq!(lexer.position(), Some(0));
    /// ```
    pub fn peek_leading_matching_value(
        &mut self,
        key_to_match: &str,
        is_lenient: bool,
    ) -> Option<Capture<'src>> {
        let mut peek = self.lookahead();
        match peek.leading_matching_value(key_to_match, is_lenient) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "discriminator lookahead hit malformed input");
                None
            }
        }
    }

    fn leading_matching_value(
        &mut self,
        key_to_match: &str,
        is_lenient: bool,
    ) -> Result<Option<Capture<'src>>, LexerError> {
        if self.consume_next_token() != TokenClass::BeginObject {
            return Ok(None);
        }
        match self.peek_string(is_lenient)? {
            Some(first_key) if first_key == key_to_match => {}
            _ => return Ok(None),
        }
        self.discard_peeked();
        self.consume_next_token_expected(COLON)?;
        self.peek_string(is_lenient)
    }
}
