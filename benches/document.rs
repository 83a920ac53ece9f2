//! Benchmarks for document load and cursor mapping.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use red::document::{CellLocation, TextDocument};

fn sample_lines() -> Vec<String> {
    (0..10_000)
        .map(|i| format!("{i:>6}\tline with some text, 漢字, and a tab\tat the end"))
        .collect()
}

fn bench_load(c: &mut Criterion) {
    let lines = sample_lines();
    c.bench_function("load_10k_lines", |b| {
        b.iter(|| TextDocument::from_lines(black_box(&lines)));
    });
}

fn bench_cell_to_cursor(c: &mut Criterion) {
    let doc = TextDocument::from_lines(sample_lines());
    c.bench_function("cell_to_cursor", |b| {
        b.iter(|| doc.cell_to_cursor(black_box(CellLocation::new(5_000, 30))));
    });
}

fn bench_max_col(c: &mut Criterion) {
    let doc = TextDocument::from_lines(sample_lines());
    c.bench_function("max_col_10k_lines", |b| b.iter(|| black_box(&doc).max_col()));
}

criterion_group!(benches, bench_load, bench_cell_to_cursor, bench_max_col);
criterion_main!(benches);
