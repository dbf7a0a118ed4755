//! Scalars and whole-value skipping.

use alloc::vec::Vec;

use super::StringJsonLexer;
use crate::{
    error::{ExpectedToken, LexerError, SyntaxError},
    literal_buffer::ExpectedLiteral,
    token::{END_LIST, END_OBJ, STRING, TokenClass, TokenClassifier},
};

impl<C: TokenClassifier> StringJsonLexer<'_, C> {
    /// Consumes an integer literal, optionally quoted.
    ///
    /// Accepts an optional leading `-`, decimal digits and an optional
    /// exponent (`e` or `E`, optionally signed). The exponent is applied
    /// exactly; a negative exponent must leave no fractional part.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::ExpectedNumber`] without digits,
    /// [`SyntaxError::UnexpectedNumericSymbol`] for stray characters,
    /// [`SyntaxError::NumericOverflow`] outside the `i64` range,
    /// [`SyntaxError::FractionalNumber`] and
    /// [`SyntaxError::ExpectedClosingQuote`].
    pub fn consume_numeric_literal(&mut self) -> Result<i64, LexerError> {
        let mut current = self.skip_whitespaces().unwrap_or(self.source.len());
        if current >= self.source.len() {
            return Err(self.error(SyntaxError::ExpectedNumber, current));
        }
        let quoted = self.source.as_bytes()[current] == b'"';
        if quoted {
            current += 1;
        }

        let start = current;
        // Accumulate negatively so `i64::MIN` is representable.
        let mut accumulator: i64 = 0;
        let mut exponent: u32 = 0;
        let mut negative = false;
        let mut exponent_positive = true;
        let mut has_exponent = false;
        while let Some(c) = self.char_at(current) {
            match c {
                'e' | 'E' if !has_exponent => {
                    if current == start {
                        return Err(self.error(SyntaxError::UnexpectedNumericSymbol(c), current));
                    }
                    has_exponent = true;
                    current += 1;
                }
                '-' | '+' if has_exponent => {
                    exponent_positive = c == '+';
                    current += 1;
                }
                '-' => {
                    if current != start {
                        return Err(self.error(SyntaxError::UnexpectedNumericSymbol(c), current));
                    }
                    negative = true;
                    current += 1;
                }
                _ if !self.is_lenient_char(c) => break,
                _ => {
                    let Some(digit) = c.to_digit(10) else {
                        return Err(self.error(SyntaxError::UnexpectedNumericSymbol(c), current));
                    };
                    current += 1;
                    if has_exponent {
                        exponent = exponent.saturating_mul(10).saturating_add(digit);
                        continue;
                    }
                    accumulator = accumulator
                        .checked_mul(10)
                        .and_then(|acc| acc.checked_sub(digit.into()))
                        .ok_or_else(|| self.error(SyntaxError::NumericOverflow, start))?;
                }
            }
        }

        if current == start || (negative && current == start + 1) {
            return Err(self.error(SyntaxError::ExpectedNumber, current));
        }
        if quoted {
            if self.char_at(current) != Some(STRING) {
                return Err(self.error(SyntaxError::ExpectedClosingQuote, current));
            }
            current += 1;
        }
        self.position = Some(current);

        if has_exponent {
            accumulator = apply_exponent(accumulator, exponent, exponent_positive)
                .map_err(|e| self.error(e, start))?;
        }
        if negative {
            Ok(accumulator)
        } else {
            accumulator
                .checked_neg()
                .ok_or_else(|| self.error(SyntaxError::NumericOverflow, start))
        }
    }

    /// Consumes `true` or `false`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::ExpectedLiteral`] when no boolean literal is next.
    pub fn consume_boolean(&mut self) -> Result<bool, LexerError> {
        let at = self.skip_whitespaces().unwrap_or(self.source.len());
        self.consume_boolean_at(at)
    }

    /// Like [`consume_boolean`](Self::consume_boolean), but the literal may
    /// be wrapped in quotes.
    ///
    /// # Errors
    ///
    /// As [`consume_boolean`](Self::consume_boolean), plus
    /// [`SyntaxError::ExpectedClosingQuote`].
    pub fn consume_boolean_lenient(&mut self) -> Result<bool, LexerError> {
        let mut at = self.skip_whitespaces().unwrap_or(self.source.len());
        let quoted = self.char_at(at) == Some(STRING);
        if quoted {
            at += 1;
        }
        let value = self.consume_boolean_at(at)?;
        if quoted {
            let end = self.offset();
            if self.char_at(end) != Some(STRING) {
                return Err(self.error(SyntaxError::ExpectedClosingQuote, end));
            }
            self.position = Some(end + 1);
        }
        Ok(value)
    }

    fn consume_boolean_at(&mut self, at: usize) -> Result<bool, LexerError> {
        let literal = self
            .char_at(at)
            .and_then(ExpectedLiteral::from_first)
            .filter(|literal| *literal != ExpectedLiteral::Null);
        let Some(literal) = literal else {
            return Err(self.error(SyntaxError::ExpectedLiteral("boolean"), at));
        };
        let Some(len) = literal.match_prefix(&self.source[at..]) else {
            return Err(self.error(SyntaxError::ExpectedLiteral(literal.kind()), at));
        };
        self.position = Some(at + len);
        Ok(literal == ExpectedLiteral::True)
    }

    /// Whether the next token is a `null` literal, consuming it when
    /// `do_consume` is set. `nullable` is not `null`.
    pub fn try_consume_null(&mut self, do_consume: bool) -> bool {
        let Some(current) = self.skip_whitespaces() else {
            return false;
        };
        let Some(len) = ExpectedLiteral::Null.match_prefix(&self.source[current..]) else {
            return false;
        };
        if self
            .char_at(current + len)
            .is_some_and(|c| self.is_lenient_char(c))
        {
            return false;
        }
        if do_consume {
            self.position = Some(current + len);
        }
        true
    }

    /// Skips one complete value: a scalar, or a container with everything
    /// nested in it.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::MismatchedBracket`] for a wrongly closed container,
    /// [`SyntaxError::UnexpectedEndOfInput`] when the input ends inside one,
    /// and any failure of string consumption.
    pub fn skip_element(&mut self, allow_lenient_strings: bool) -> Result<(), LexerError> {
        if !matches!(
            self.peek_next_token(),
            TokenClass::BeginList | TokenClass::BeginObject
        ) {
            self.consume_string_lenient()?;
            return Ok(());
        }

        let mut open: Vec<TokenClass> = Vec::new();
        loop {
            match self.peek_next_token() {
                TokenClass::String => {
                    if allow_lenient_strings {
                        self.consume_string_lenient()?;
                    } else {
                        self.consume_key_string()?;
                    }
                    continue;
                }
                class @ (TokenClass::BeginList | TokenClass::BeginObject) => open.push(class),
                TokenClass::EndList => self.close_container(&mut open, END_LIST)?,
                TokenClass::EndObject => self.close_container(&mut open, END_OBJ)?,
                TokenClass::Eof => {
                    let expected = match open.last() {
                        Some(TokenClass::BeginList) => TokenClass::EndList,
                        _ => TokenClass::EndObject,
                    };
                    return Err(self.error(
                        SyntaxError::UnexpectedEndOfInput {
                            expected: ExpectedToken::class(expected),
                        },
                        self.source.len(),
                    ));
                }
                _ => {}
            }
            self.consume_next_token();
            if open.is_empty() {
                return Ok(());
            }
        }
    }

    fn close_container(&self, open: &mut Vec<TokenClass>, found: char) -> Result<(), LexerError> {
        let expected = match open.pop() {
            Some(TokenClass::BeginList) => END_LIST,
            _ => END_OBJ,
        };
        if expected == found {
            Ok(())
        } else {
            Err(self.error(
                SyntaxError::MismatchedBracket { expected, found },
                self.offset(),
            ))
        }
    }
}

/// Scales a non-positive accumulator by `10^exponent`.
fn apply_exponent(value: i64, exponent: u32, positive: bool) -> Result<i64, SyntaxError> {
    if value == 0 {
        return Ok(0);
    }
    let scale = 10_i64.checked_pow(exponent);
    if positive {
        scale
            .and_then(|scale| value.checked_mul(scale))
            .ok_or(SyntaxError::NumericOverflow)
    } else {
        match scale {
            Some(scale) if value % scale == 0 => Ok(value / scale),
            _ => Err(SyntaxError::FractionalNumber),
        }
    }
}
