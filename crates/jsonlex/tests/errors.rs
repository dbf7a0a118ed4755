#![expect(missing_docs)]

mod common;

use jsonlex::{BATCH_SIZE, LexerError, StringJsonLexer, SyntaxError, TokenClass};
use rstest::rstest;

use crate::common::error_message;

#[rstest]
#[case::missing_colon(r#"{"a" 1}"#, "expected colon ':', but had '1' instead at 1:6")]
#[case::unterminated(
    r#"{"a": "unterminated"#,
    r#"unterminated string, expected quotation mark '"' at 1:20"#
)]
#[case::null_key("{null: 1}", "expected string literal but 'null' literal was found at 1:2")]
#[case::invalid_escape(r#"["\x"]"#, "invalid escaped char 'x' at 1:4")]
#[case::lone_surrogate(r#"["\uD83D"]"#, r"invalid unicode escape sequence \uD83D at 1:3")]
#[case::bad_hex(
    r#"["\u12G4"]"#,
    "invalid unicode escape sequence at character: 'G' at 1:7"
)]
#[case::float("[1.5]", "unexpected symbol '.' in numeric literal at 1:3")]
#[case::overflow("[9223372036854775808]", "numeric value overflow at 1:2")]
#[case::fractional("[15e-1]", "numeric literal does not denote an integer at 1:2")]
#[case::bad_boolean("{\n  \"a\": tru\n}", "expected valid boolean literal at 2:8")]
#[case::wrong_close(r#"{"a": [1}"#, "expected end of the array ']', but had '}' instead at 1:9")]
#[case::trailing(r#"{"a": 1} x"#, "expected end of the input, but had 'x' instead at 1:10")]
#[case::truncated(r#"{"a":"#, r#"expected quotation mark '"', but had 'EOF' instead at 1:6"#)]
#[case::punctuation("[}", "expected beginning of the string, but got '}' at 1:2")]
fn error_messages(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(error_message(source).as_deref(), Some(expected));
}

#[rstest]
#[case("{}")]
#[case("[]")]
#[case(r#"  {"a": [1, -2, "x"], "b": {"c": null}}  "#)]
#[case("\u{FEFF}true")]
fn well_formed_documents_have_no_error(#[case] source: &str) {
    assert_eq!(error_message(source), None);
}

#[test]
fn skip_element_reports_mismatched_brackets() {
    let mut lexer = StringJsonLexer::new("[1, {]}");
    let err = lexer.skip_element(false).unwrap_err();
    assert_eq!(
        err.syntax_error(),
        &SyntaxError::MismatchedBracket {
            expected: '}',
            found: ']'
        }
    );
    insta::assert_snapshot!(err.to_string(), @"found ']' instead of '}' at 1:6");
}

#[test]
fn long_strings_are_emitted_in_batches() {
    let source = format!("\"{}\"", "a".repeat(40_000));
    let mut lexer = StringJsonLexer::new(&source);
    let mut lengths = Vec::new();
    lexer
        .consume_string_chunked(false, |chunk| lengths.push(chunk.len()))
        .unwrap();
    assert_eq!(BATCH_SIZE, 16 * 1024);
    assert_eq!(lengths, [BATCH_SIZE, BATCH_SIZE, 40_000 - 2 * BATCH_SIZE]);
}

/// Counts the elements of a top-level array, rejecting stray commas the way a
/// tree decoder would.
fn array_len(source: &str) -> Result<usize, LexerError> {
    let mut lexer = StringJsonLexer::new(source);
    lexer.consume_next_token_class(TokenClass::BeginList)?;
    if lexer.peek_next_token() == TokenClass::Comma {
        return Err(lexer.fail("unexpected leading comma"));
    }
    let mut len = 0;
    while lexer.can_consume_value() {
        lexer.skip_element(false)?;
        len += 1;
        if !lexer.try_consume_comma() {
            break;
        }
        if lexer.peek_next_token() == TokenClass::EndList {
            return Err(lexer.fail("trailing comma before the end of the array"));
        }
    }
    lexer.consume_next_token_class(TokenClass::EndList)?;
    lexer.consume_next_token_class(TokenClass::Eof)?;
    Ok(len)
}

#[rstest]
#[case("[]", Ok(0))]
#[case(r#"[1, "a", [2]]"#, Ok(3))]
#[case("[,1]", Err("unexpected leading comma at 1:2"))]
#[case("[1,]", Err("trailing comma before the end of the array at 1:4"))]
#[case("{}", Err("expected start of the array '[', but had '{' instead at 1:1"))]
#[case("[1] 2", Err("expected end of the input, but had '2' instead at 1:5"))]
#[case("[1", Err("expected end of the array ']', but had 'EOF' instead at 1:3"))]
fn decoder_reports_positioned_failures(
    #[case] source: &str,
    #[case] expected: Result<usize, &str>,
) {
    assert_eq!(
        array_len(source).map_err(|err| err.to_string()),
        expected.map_err(String::from)
    );
}

#[test]
fn custom_failure_is_distinguishable() {
    let err = array_len("[,]").unwrap_err();
    assert_eq!(err.syntax_error(), &SyntaxError::Custom("unexpected leading comma"));
    assert_eq!((err.line, err.column), (1, 2));
}
