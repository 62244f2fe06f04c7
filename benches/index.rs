//! Index translation and iteration benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use unistr::TextBuffer;

fn counting(c: &mut Criterion) {
    let ascii = "Hello, World! This is a test string. ".repeat(50);
    let mixed = "Hello, 世界! e\u{0301} 👨‍👩‍👧 🇺🇸 ".repeat(50);

    let ascii_buf = TextBuffer::with_text(&ascii);
    c.bench_function("code_point_count_ascii", |b| {
        b.iter(|| black_box(&ascii_buf).code_point_count())
    });
    c.bench_function("grapheme_count_ascii", |b| {
        b.iter(|| black_box(&ascii_buf).grapheme_count())
    });

    let mixed_buf = TextBuffer::with_text(&mixed);
    c.bench_function("code_point_count_mixed", |b| {
        b.iter(|| black_box(&mixed_buf).code_point_count())
    });
    c.bench_function("grapheme_count_mixed", |b| {
        b.iter(|| black_box(&mixed_buf).grapheme_count())
    });
}

fn lookups(c: &mut Criterion) {
    let mixed = "Hello, 世界! e\u{0301} 👨‍👩‍👧 🇺🇸 ".repeat(50);
    let buf = TextBuffer::with_text(&mixed);

    c.bench_function("grapheme_at_front", |b| {
        b.iter(|| black_box(&buf).grapheme_at(black_box(3)))
    });
    c.bench_function("grapheme_at_negative", |b| {
        b.iter(|| black_box(&buf).grapheme_at(black_box(-3)))
    });
    c.bench_function("substr_middle", |b| {
        b.iter(|| black_box(&buf).substr(black_box(100), black_box(200)))
    });
    c.bench_function("index_of_late_match", |b| {
        b.iter(|| black_box(&buf).last_index_of(black_box("🇺🇸")))
    });
}

criterion_group!(benches, counting, lookups);
criterion_main!(benches);
