//! A cursor-based JSON lexer for in-memory sources.
//!
//! [`StringJsonLexer`] walks a fully loaded `&str` and hands a decoder the
//! pieces it needs: classified structural tokens, object keys and string
//! values (borrowed from the source whenever they contain no escapes),
//! integer and boolean scalars, and a cursor-neutral lookahead used to sniff
//! polymorphic discriminators before committing to a type.
//!
//! ```rust
//! use jsonlex::{StringJsonLexer, TokenClass};
//!
//! let mut lexer = StringJsonLexer::new(r#"{"type":"point","x":3}"#);
//! assert_eq!(lexer.peek_leading_matching_value("type", false).unwrap(), "point");
//!
//! assert_eq!(lexer.consume_next_token(), TokenClass::BeginObject);
//! assert_eq!(lexer.consume_key_string().unwrap(), "type");
//! lexer.consume_next_token_expected(':').unwrap();
//! assert!(lexer.consume_string().unwrap().is_borrowed());
//! assert!(lexer.try_consume_comma());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod capture;
mod chunk_utils;
mod error;
mod escape_buffer;
mod lexer;
mod literal_buffer;
mod options;
pub mod token;


pub use capture::Capture;
pub use error::{ExpectedToken, LexerError, SyntaxError};
pub use lexer::{Lookahead, StringJsonLexer};
pub use options::{BATCH_SIZE, LexerOptions};
pub use token::{JsonClassifier, TokenClass, TokenClassifier};
