//! Token classes and the classifier seam the lexer depends on.
//!
//! The lexer never interprets characters itself beyond whitespace and the
//! exact-character checks it is asked to perform. Everything else goes
//! through a [`TokenClassifier`], which maps one scalar to a [`TokenClass`]
//! and decides whether a scalar may start a JSON value.

use core::fmt;

/// Quotation mark opening and closing a JSON string.
pub const STRING: char = '"';
/// Escape introducer inside a JSON string.
pub const STRING_ESC: char = '\\';
/// Name separator.
pub const COLON: char = ':';
/// Value separator.
pub const COMMA: char = ',';
/// Start of an object.
pub const BEGIN_OBJ: char = '{';
/// End of an object.
pub const END_OBJ: char = '}';
/// Start of an array.
pub const BEGIN_LIST: char = '[';
/// End of an array.
pub const END_LIST: char = ']';
/// Byte-order mark skipped once at the start of the source.
pub const BOM: char = '\u{FEFF}';

/// Lexical category of a single scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenClass {
    /// Anything that is not punctuation: literal letters, digits, signs,
    /// and the characters of unquoted lenient strings.
    Other = 0,
    /// `"`
    String = 1,
    /// `\`
    StringEscape = 2,
    /// Whitespace between tokens.
    Whitespace = 3,
    /// `,`
    Comma = 4,
    /// `:`
    Colon = 5,
    /// `{`
    BeginObject = 6,
    /// `}`
    EndObject = 7,
    /// `[`
    BeginList = 8,
    /// `]`
    EndList = 9,
    /// No scalar remains.
    Eof = 10,
    /// A control character that can never appear between tokens.
    Invalid = 127,
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenClass::String => "quotation mark '\"'",
            TokenClass::StringEscape => "string escape sequence '\\'",
            TokenClass::Comma => "comma ','",
            TokenClass::Colon => "colon ':'",
            TokenClass::BeginObject => "start of the object '{'",
            TokenClass::EndObject => "end of the object '}'",
            TokenClass::BeginList => "start of the array '['",
            TokenClass::EndList => "end of the array ']'",
            TokenClass::Eof => "end of the input",
            TokenClass::Invalid => "invalid token",
            TokenClass::Other | TokenClass::Whitespace => "valid token",
        })
    }
}

impl TokenClass {
    /// The one character the RFC 8259 classifier gives this class, for the
    /// classes that have one.
    #[must_use]
    pub const fn canonical_char(self) -> Option<char> {
        Some(match self {
            TokenClass::String => STRING,
            TokenClass::StringEscape => STRING_ESC,
            TokenClass::Comma => COMMA,
            TokenClass::Colon => COLON,
            TokenClass::BeginObject => BEGIN_OBJ,
            TokenClass::EndObject => END_OBJ,
            TokenClass::BeginList => BEGIN_LIST,
            TokenClass::EndList => END_LIST,
            TokenClass::Other | TokenClass::Whitespace | TokenClass::Eof | TokenClass::Invalid => {
                return None;
            }
        })
    }
}

/// Maps scalars to token classes.
///
/// Implementations must be pure: the same scalar always yields the same
/// answer, since the lexer re-classifies freely while backtracking during
/// lookahead.
pub trait TokenClassifier {
    /// Classifies one scalar.
    fn classify(&self, c: char) -> TokenClass;

    /// Whether `c` may begin a JSON value.
    fn is_valid_value_start(&self, c: char) -> bool;
}

/// The RFC 8259 classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonClassifier;

impl TokenClassifier for JsonClassifier {
    #[inline]
    fn classify(&self, c: char) -> TokenClass {
        match c {
            ' ' | '\t' | '\n' | '\r' => TokenClass::Whitespace,
            STRING => TokenClass::String,
            STRING_ESC => TokenClass::StringEscape,
            COMMA => TokenClass::Comma,
            COLON => TokenClass::Colon,
            BEGIN_OBJ => TokenClass::BeginObject,
            END_OBJ => TokenClass::EndObject,
            BEGIN_LIST => TokenClass::BeginList,
            END_LIST => TokenClass::EndList,
            c if (c as u32) < 0x20 => TokenClass::Invalid,
            _ => TokenClass::Other,
        }
    }

    #[inline]
    fn is_valid_value_start(&self, c: char) -> bool {
        matches!(c, STRING | BEGIN_OBJ | BEGIN_LIST | '-' | '0'..='9' | 't' | 'f' | 'n')
    }
}

impl<T: TokenClassifier + ?Sized> TokenClassifier for &T {
    fn classify(&self, c: char) -> TokenClass {
        (**self).classify(c)
    }

    fn is_valid_value_start(&self, c: char) -> bool {
        (**self).is_valid_value_start(c)
    }
}
