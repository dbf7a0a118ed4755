use core::fmt;

use thiserror::Error;

use crate::token::TokenClass;

/// A lexing failure and the place in the source where it happened.
///
/// Failures are terminal: the lexer that produced one is left positioned at
/// the failure and the decoder is expected to abort the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct LexerError {
    pub(crate) source: SyntaxError,
    /// Byte offset into the source.
    pub position: usize,
    /// 1-based line of `position`.
    pub line: usize,
    /// 1-based column of `position`, counted in scalars.
    pub column: usize,
}

impl LexerError {
    pub(crate) fn new(input: &str, source: SyntaxError, position: usize) -> Self {
        let position = position.min(input.len());
        let prefix = input.get(..position).unwrap_or(input).as_bytes();
        let line = memchr::memchr_iter(b'\n', prefix).count() + 1;
        let line_start = memchr::memrchr(b'\n', prefix).map_or(0, |nl| nl + 1);
        let column = input
            .get(line_start..position)
            .map_or(0, |line| line.chars().count())
            + 1;
        Self {
            source,
            position,
            line,
            column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn syntax_error(&self) -> &SyntaxError {
        &self.source
    }
}

/// What a failed token check was looking for.
///
/// Exact-character checks carry the character itself. Class checks, such as
/// the end-of-input check, carry only the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedToken {
    /// Class of the required token, as the lexer's classifier sees it.
    pub class: TokenClass,
    /// The exact character that was required, if the check was for one.
    pub char: Option<char>,
}

impl ExpectedToken {
    /// Any token of `class`.
    #[must_use]
    pub const fn class(class: TokenClass) -> Self {
        Self { class, char: None }
    }

    /// Exactly `char`, which classifies as `class`.
    #[must_use]
    pub const fn exact(char: char, class: TokenClass) -> Self {
        Self {
            class,
            char: Some(char),
        }
    }
}

impl fmt::Display for ExpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.char {
            // Class descriptions already quote their own character.
            Some(c) if self.class.canonical_char() != Some(c) => write!(f, "'{c}'"),
            _ => fmt::Display::fmt(&self.class, f),
        }
    }
}

/// The kind of a [`LexerError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A specific token was required and another character was found.
    #[error("expected {expected}, but had '{found}' instead")]
    UnexpectedToken {
        /// The token that was required.
        expected: ExpectedToken,
        /// The character found instead.
        found: char,
    },
    /// The input ended while a token was required.
    #[error("expected {expected}, but had 'EOF' instead")]
    UnexpectedEndOfInput {
        /// The token that was required.
        expected: ExpectedToken,
    },
    /// No closing quote follows an opening quote.
    #[error("unterminated string, expected quotation mark '\"'")]
    UnterminatedString,
    /// A string was required and a `null` literal was found.
    #[error("expected string literal but 'null' literal was found")]
    NullInsteadOfString,
    /// Lenient string consumption found punctuation.
    #[error("expected beginning of the string, but got '{0}'")]
    ExpectedStringStart(char),
    /// A backslash is followed by a character that is not an escape.
    #[error("invalid escaped char '{0}'")]
    InvalidEscape(char),
    /// A `\u` escape contains a non-hexadecimal digit.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A `\u` escape denotes an unpaired surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A numeric literal contains a character that is not part of one.
    #[error("unexpected symbol '{0}' in numeric literal")]
    UnexpectedNumericSymbol(char),
    /// A numeric literal has no digits.
    #[error("expected numeric literal")]
    ExpectedNumber,
    /// A numeric literal does not fit in an `i64`.
    #[error("numeric value overflow")]
    NumericOverflow,
    /// A negative exponent leaves a fractional part.
    #[error("numeric literal does not denote an integer")]
    FractionalNumber,
    /// A quoted scalar is missing its closing quote.
    #[error("expected closing quotation mark")]
    ExpectedClosingQuote,
    /// A `true`, `false` or `null` literal is malformed.
    #[error("expected valid {0} literal")]
    ExpectedLiteral(&'static str),
    /// A container was closed by the wrong bracket.
    #[error("found '{found}' instead of '{expected}'")]
    MismatchedBracket {
        /// The bracket that closes the open container.
        expected: char,
        /// The bracket found instead.
        found: char,
    },
    /// A failure reported by the decoder driving the lexer.
    #[error("{0}")]
    Custom(&'static str),
}
