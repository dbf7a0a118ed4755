#![allow(missing_docs)]
#![allow(dead_code)]

use jsonlex::{Capture, LexerError, StringJsonLexer, TokenClass};

pub const DOCUMENT: &str = r#"{
  "type": "entity",
  "name": "main",
  "tags": ["a\"b", "é", "\u00e9"],
  "count": -12,
  "big": 1e3,
  "ok": true,
  "none": null,
  "empty": {},
  "list": []
}"#;

/// Decodes `source` with a minimal recursive decoder and renders one line
/// per token, ending with `Eof` or the error that stopped the walk.
pub fn render(source: &str) -> String {
    let mut lexer = StringJsonLexer::new(source);
    let mut out = Vec::new();
    if let Some(kind) = lexer.peek_leading_matching_value("type", false) {
        out.push(format!("Discriminator {:?}", kind.as_str()));
    }
    match value(&mut lexer, &mut out).and_then(|()| lexer.expect_eof()) {
        Ok(()) => out.push("Eof".to_owned()),
        Err(err) => out.push(format!("Error: {err}")),
    }
    out.join("\n")
}

/// The error `render` stops at, if any.
pub fn error_message(source: &str) -> Option<String> {
    let mut lexer = StringJsonLexer::new(source);
    let mut out = Vec::new();
    value(&mut lexer, &mut out)
        .and_then(|()| lexer.expect_eof())
        .err()
        .map(|err| err.to_string())
}

fn ownership(capture: &Capture<'_>) -> &'static str {
    if capture.is_borrowed() {
        "borrowed"
    } else {
        "owned"
    }
}

fn value(lexer: &mut StringJsonLexer<'_>, out: &mut Vec<String>) -> Result<(), LexerError> {
    match lexer.peek_next_token() {
        TokenClass::BeginObject => {
            lexer.consume_next_token();
            out.push("BeginObject".to_owned());
            if lexer.peek_next_token() != TokenClass::EndObject {
                loop {
                    let key = lexer.consume_key_string()?;
                    out.push(format!("Key {:?} ({})", key.as_str(), ownership(&key)));
                    lexer.consume_next_token_expected(':')?;
                    value(lexer, out)?;
                    if !lexer.try_consume_comma() {
                        break;
                    }
                }
            }
            lexer.consume_next_token_expected('}')?;
            out.push("EndObject".to_owned());
        }
        TokenClass::BeginList => {
            lexer.consume_next_token();
            out.push("BeginList".to_owned());
            if lexer.peek_next_token() != TokenClass::EndList {
                loop {
                    value(lexer, out)?;
                    if !lexer.try_consume_comma() {
                        break;
                    }
                }
            }
            lexer.consume_next_token_expected(']')?;
            out.push("EndList".to_owned());
        }
        TokenClass::String => {
            let s = lexer.consume_string()?;
            out.push(format!("String {:?} ({})", s.as_str(), ownership(&s)));
        }
        TokenClass::Other if lexer.try_consume_null(true) => out.push("Null".to_owned()),
        TokenClass::Other => {
            let rest = &lexer.source()[lexer.position().unwrap_or_default()..];
            if rest.starts_with(['t', 'f', 'T', 'F']) {
                out.push(format!("Boolean {}", lexer.consume_boolean()?));
            } else {
                out.push(format!("Number {}", lexer.consume_numeric_literal()?));
            }
        }
        _ => {
            let s = lexer.consume_string_lenient()?;
            out.push(format!("Unquoted {:?}", s.as_str()));
        }
    }
    Ok(())
}
