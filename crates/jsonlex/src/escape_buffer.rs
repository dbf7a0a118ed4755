//! Decoding of backslash escapes inside JSON strings.
//!
//! The [`UnicodeEscapeBuffer`] accumulates the four ASCII hexadecimal digits
//! of a `\uXXXX` escape and yields the UTF-16 code unit they denote. It also
//! remembers a pending high surrogate so that a following low-surrogate
//! escape can be combined into a single [`char`].
//!
//! # Errors
//!
//! - Feeding a non-hexadecimal character returns
//!   [`SyntaxError::InvalidUnicodeEscapeChar`].
//! - A low surrogate without a preceding high surrogate, or a high surrogate
//!   not followed by a low one, returns
//!   [`SyntaxError::InvalidUnicodeEscapeSequence`].
use crate::error::SyntaxError;

/// Maps the character after `\` to the scalar it stands for. `u` is not
/// handled here.
#[inline]
pub(crate) fn escape_to_char(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        _ => return None,
    })
}

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    code: u16,
    len: u8,
    high_surrogate: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one hex digit. Returns `Ok(Some(unit))` after the fourth.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let digit = c
            .to_digit(16)
            .ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        // `to_digit(16)` is always below 16, and four digits fill a `u16`.
        #[expect(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.code = (self.code << 4) | digit;
        self.len += 1;
        if self.len == 4 {
            let unit = self.code;
            self.code = 0;
            self.len = 0;
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }

    /// Combines a complete code unit with any pending high surrogate.
    ///
    /// Returns `Ok(None)` while a high surrogate waits for its partner.
    pub fn combine(&mut self, unit: u16) -> Result<Option<char>, SyntaxError> {
        match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                Ok(None)
            }
            (None, 0xDC00..=0xDFFF) => Err(SyntaxError::InvalidUnicodeEscapeSequence(unit.into())),
            (None, _) => Ok(char::from_u32(unit.into())),
            (Some(high), 0xDC00..=0xDFFF) => {
                let code =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                Ok(char::from_u32(code))
            }
            (Some(high), _) => Err(SyntaxError::InvalidUnicodeEscapeSequence(high.into())),
        }
    }

    /// The high surrogate still waiting for a low surrogate, if any.
    #[cfg(test)]
    pub fn pending_surrogate(&self) -> Option<u16> {
        self.high_surrogate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(hex: &str) -> Result<Option<u16>, SyntaxError> {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = None;
        for ch in hex.chars() {
            out = buf.feed(ch)?;
        }
        Ok(out)
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some(0x41));
        assert_eq!(buf.combine(0x41).unwrap(), Some('A'));
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(decode("AbCd").unwrap(), Some(0xABCD));
    }

    #[test]
    fn invalid_hex_error() {
        assert_eq!(decode("00G1"), Err(SyntaxError::InvalidUnicodeEscapeChar('G')));
    }

    #[test]
    fn surrogate_pair_combines() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.combine(0xD83D).unwrap(), None);
        assert_eq!(buf.pending_surrogate(), Some(0xD83D));
        assert_eq!(buf.combine(0xDE00).unwrap(), Some('😀'));
        assert_eq!(buf.pending_surrogate(), None);
    }

    #[test]
    fn lone_low_surrogate_is_rejected() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(
            buf.combine(0xDC00),
            Err(SyntaxError::InvalidUnicodeEscapeSequence(0xDC00))
        );
    }

    #[test]
    fn high_surrogate_followed_by_scalar_is_rejected() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.combine(0xD800).unwrap(), None);
        assert_eq!(
            buf.combine(0x0041),
            Err(SyntaxError::InvalidUnicodeEscapeSequence(0xD800))
        );
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(escape_to_char('n'), Some('\n'));
        assert_eq!(escape_to_char('/'), Some('/'));
        assert_eq!(escape_to_char('x'), None);
    }
}
