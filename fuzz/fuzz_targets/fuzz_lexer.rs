#![no_main]

use arbitrary::Arbitrary;
use jsonlex::{LexerOptions, StringJsonLexer, TokenClass};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// One lexer call chosen by the fuzzer.
#[derive(Debug, Arbitrary)]
enum Op {
    NextToken,
    PeekToken,
    Expected(char),
    KeyString,
    String,
    StringLenient,
    Chunked { is_lenient: bool },
    Number,
    Boolean { is_lenient: bool },
    Null { do_consume: bool },
    Comma,
    Skip { is_lenient: bool },
    PeekString { is_lenient: bool },
    DiscardPeeked,
    Sniff { key: String, is_lenient: bool },
    CanConsumeValue,
}

#[derive(Debug, Arbitrary)]
struct Input {
    allow_unicode_whitespace: bool,
    chunk_size: u8,
    text: String,
    ops: Vec<Op>,
    value: ArbitraryValue,
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(16)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3..=8 => Value::String(u.arbitrary()?),
            9..=12 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Runs arbitrary call sequences and checks that the lexer never panics and
/// that sniffing never moves the cursor.
fn drive(input: &Input) {
    let options = LexerOptions {
        allow_unicode_whitespace: input.allow_unicode_whitespace,
        string_chunk_size: usize::from(input.chunk_size),
    };
    let mut lexer = StringJsonLexer::with_options(&input.text, options);
    for op in &input.ops {
        match op {
            Op::NextToken => {
                lexer.consume_next_token();
            }
            Op::PeekToken => {
                lexer.peek_next_token();
            }
            Op::Expected(c) => {
                let _ = lexer.consume_next_token_expected(*c);
            }
            Op::KeyString => {
                let _ = lexer.consume_key_string();
            }
            Op::String => {
                let _ = lexer.consume_string();
            }
            Op::StringLenient => {
                let _ = lexer.consume_string_lenient();
            }
            Op::Chunked { is_lenient } => {
                let _ = lexer
                    .consume_string_chunked(*is_lenient, |chunk| assert!(!chunk.is_empty()));
            }
            Op::Number => {
                let _ = lexer.consume_numeric_literal();
            }
            Op::Boolean { is_lenient: true } => {
                let _ = lexer.consume_boolean_lenient();
            }
            Op::Boolean { is_lenient: false } => {
                let _ = lexer.consume_boolean();
            }
            Op::Null { do_consume } => {
                lexer.try_consume_null(*do_consume);
            }
            Op::Comma => {
                lexer.try_consume_comma();
            }
            Op::Skip { is_lenient } => {
                let _ = lexer.skip_element(*is_lenient);
            }
            Op::PeekString { is_lenient } => {
                let _ = lexer.peek_string(*is_lenient);
            }
            Op::DiscardPeeked => lexer.discard_peeked(),
            Op::Sniff { key, is_lenient } => {
                let before = lexer.position();
                let _ = lexer.peek_leading_matching_value(key, *is_lenient);
                assert_eq!(lexer.position(), before);
            }
            Op::CanConsumeValue => {
                lexer.can_consume_value();
            }
        }
        if let Some(position) = lexer.position() {
            assert!(position <= input.text.len());
        }
        if lexer.peek_next_token() == TokenClass::Eof {
            break;
        }
    }
}

/// Serialized values must be skipped whole, and strings must decode back to
/// what serde_json encoded.
fn round_trip(value: &Value) {
    let Ok(src) = serde_json::to_string(value) else {
        return;
    };
    let mut lexer = StringJsonLexer::new(&src);
    lexer.skip_element(false).expect("serialized value is well formed");
    lexer.expect_eof().expect("value is skipped whole");

    if let Value::String(s) = value {
        let decoded = StringJsonLexer::new(&src)
            .consume_string()
            .expect("serialized string is well formed");
        assert_eq!(decoded, *s.as_str());
    }
}

fuzz_target!(|input: Input| {
    drive(&input);
    round_trip(&input.value.0);
});
