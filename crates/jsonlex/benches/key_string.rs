//! Benchmark – `jsonlex::StringJsonLexer` key and string consumption
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonlex::{LexerOptions, StringJsonLexer, TokenClass};

/// A deterministic object with `fields` keys. When `escaped` is set every
/// value carries one escape, forcing the decoding path.
fn make_object(fields: usize, value_len: usize, escaped: bool) -> String {
    let mut s = String::from("{");
    for i in 0..fields {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("\"field_{i}\":\""));
        s.extend(std::iter::repeat_n('v', value_len));
        if escaped {
            s.push_str("\\n");
        }
        s.push('"');
    }
    s.push('}');
    s
}

/// Walks a flat object of string values and returns the decoded byte count.
fn walk_object(payload: &str) -> usize {
    let mut lexer = StringJsonLexer::new(payload);
    let mut total = 0;
    assert_eq!(lexer.consume_next_token(), TokenClass::BeginObject);
    loop {
        total += lexer.consume_key_string().unwrap().len();
        lexer.consume_next_token_expected(':').unwrap();
        total += lexer.consume_string().unwrap().len();
        if !lexer.try_consume_comma() {
            break;
        }
    }
    assert_eq!(lexer.consume_next_token(), TokenClass::EndObject);
    total
}

fn bench_key_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_string");

    for &value_len in &[8usize, 256, 4_096] {
        for escaped in [false, true] {
            let payload = make_object(256, value_len, escaped);
            let name = if escaped { "escaped" } else { "plain" };
            group.bench_with_input(
                BenchmarkId::new(value_len.to_string(), name),
                &payload,
                |b, payload| {
                    b.iter(|| black_box(walk_object(black_box(payload))));
                },
            );
        }
    }

    group.finish();
}

fn bench_chunked(c: &mut Criterion) {
    let payload = format!("\"{}\"", "a".repeat(1 << 20));
    let mut group = c.benchmark_group("string_chunked");

    for &chunk_size in &[1_024usize, 16 * 1_024, 256 * 1_024] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut lexer = StringJsonLexer::with_options(
                        black_box(&payload),
                        LexerOptions {
                            string_chunk_size: chunk_size,
                            ..Default::default()
                        },
                    );
                    let mut chunks = 0usize;
                    lexer
                        .consume_string_chunked(false, |_| chunks += 1)
                        .unwrap();
                    black_box(chunks);
                });
            },
        );
    }

    group.finish();
}

fn bench_lookahead(c: &mut Criterion) {
    let payload = format!("{{\"type\":\"circle\",{}", &make_object(64, 16, false)[1..]);
    c.bench_function("peek_leading_matching_value", |b| {
        b.iter(|| {
            let mut lexer = StringJsonLexer::new(black_box(&payload));
            black_box(lexer.peek_leading_matching_value("type", false));
        });
    });
}

fn config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_key_string, bench_chunked, bench_lookahead
}
criterion_main!(benches);
