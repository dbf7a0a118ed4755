/// Maximum size in bytes of one piece handed out by
/// [`consume_string_chunked`](crate::StringJsonLexer::consume_string_chunked).
pub const BATCH_SIZE: usize = 16 * 1024;

/// Configuration options for the JSON lexer.
///
/// Grammar leniency is not an option here: lenient consumption is requested
/// per call by the decoder, which owns that policy.
///
/// # Examples
///
/// ```rust
/// use jsonlex::{LexerOptions, StringJsonLexer};
///
/// let options = LexerOptions {
///     allow_unicode_whitespace: true,
///     ..Default::default()
/// };
/// let mut lexer = StringJsonLexer::with_options("\u{3000}[]", options);
/// assert!(lexer.can_consume_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LexerOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the lexer only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Upper bound in bytes for each chunk emitted by chunked string
    /// consumption. A chunk may exceed it by up to three bytes so that no
    /// UTF-8 scalar is split. Zero is treated as one.
    ///
    /// # Default
    ///
    /// [`BATCH_SIZE`]
    pub string_chunk_size: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            string_chunk_size: BATCH_SIZE,
        }
    }
}
