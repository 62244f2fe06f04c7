//! Mutation benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use unistr::TextBuffer;

fn edits(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. Héllo 😊\n".repeat(40);

    c.bench_function("replace_all_o", |b| {
        b.iter_batched(
            || TextBuffer::with_text(&text),
            |mut buf| buf.replace(black_box("o"), black_box("0")),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("reverse_code_points", |b| {
        b.iter_batched(
            || TextBuffer::with_text(&text),
            |mut buf| buf.reverse(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("insert_middle", |b| {
        b.iter_batched(
            || TextBuffer::with_text(&text),
            |mut buf| buf.insert(black_box("inserted"), black_box(500)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("to_uppercase", |b| {
        b.iter_batched(
            || TextBuffer::with_text(&text),
            |mut buf| buf.to_uppercase(),
            BatchSize::SmallInput,
        )
    });
}

fn splitting(c: &mut Criterion) {
    let text = "alpha beta  gamma delta\r\n".repeat(100);
    let buf = TextBuffer::with_text(&text);

    c.bench_function("split_spaces", |b| b.iter(|| black_box(&buf).split(" ").len()));
    c.bench_function("tokenize_spaces", |b| {
        b.iter(|| black_box(&buf).token_iter(" ").count())
    });
    c.bench_function("lines", |b| b.iter(|| black_box(&buf).lines().count()));
}

criterion_group!(benches, edits, splitting);
criterion_main!(benches);
