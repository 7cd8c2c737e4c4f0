//! Verse formatting benchmarks.
//!
//! Measures the uncached pipeline, cache hits, and segmentation alone across
//! verse lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use verse_card::{format_verse, segment, wrap_by_length, VerseFormatter};

const VERSE: &str =
    "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라. 그리하면 주시리라.";

/// Repeat the sample verse `n` times.
fn generate_n_verses(n: usize) -> String {
    vec![VERSE; n].join(" ")
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for n in [1, 4, 16] {
        let text = generate_n_verses(n);
        group.bench_with_input(BenchmarkId::new("uncached", n), &text, |b, text| {
            b.iter(|| format_verse(black_box(text), 15));
        });
        group.bench_with_input(BenchmarkId::new("fallback", n), &text, |b, text| {
            b.iter(|| wrap_by_length(black_box(text), 15));
        });
    }
    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let mut formatter = VerseFormatter::new();
    formatter.format(VERSE, 15);
    c.bench_function("format/cached", |b| {
        b.iter(|| formatter.format(black_box(VERSE), 15));
    });
}

fn bench_segment(c: &mut Criterion) {
    c.bench_function("segment", |b| b.iter(|| segment(black_box(VERSE))));
}

criterion_group!(benches, bench_format, bench_cache_hit, bench_segment);
criterion_main!(benches);
