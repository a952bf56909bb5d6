//! Normalization and library benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use nook_core::catalog::VolumesResponse;
use nook_core::storage::MemoryStorage;
use nook_core::types::BookRecord;
use nook_core::LibraryService;
use std::hint::black_box;
use std::sync::Arc;

fn volumes_json(count: usize) -> String {
    let items: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("vol-{}", i),
                "volumeInfo": {
                    "title": format!("Volume {}", i),
                    "authors": ["Some Author"],
                    "pageCount": 300,
                    "categories": ["Fiction"],
                    "imageLinks": { "thumbnail": "http://img/thumb" }
                }
            })
        })
        .collect();
    serde_json::json!({ "items": items }).to_string()
}

fn normalization_benchmark(c: &mut Criterion) {
    let body = volumes_json(40);
    c.bench_function("normalize 40 volumes", |b| {
        b.iter(|| {
            let response: VolumesResponse = serde_json::from_str(black_box(&body)).unwrap();
            black_box(response.into_records())
        })
    });
}

fn library_benchmark(c: &mut Criterion) {
    c.bench_function("add 200 books", |b| {
        b.iter(|| {
            let mut lib = LibraryService::open(Arc::new(MemoryStorage::new()));
            for i in 0..200 {
                lib.add_book(BookRecord::new(format!("book-{}", i), "Title"));
            }
            black_box(lib.stats())
        })
    });
}

criterion_group!(benches, normalization_benchmark, library_benchmark);
criterion_main!(benches);
