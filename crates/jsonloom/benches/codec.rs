//! Benchmark – serialize/deserialize throughput over both encodings.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonloom::{utf16, utf8};

/// Deterministic integer payload; the multiplier scatters digit counts so
/// the number emitter sees realistic widths.
fn int_payload(len: usize) -> Vec<i64> {
    (0..len as i64).map(|i| i.wrapping_mul(2_654_435_761)).collect()
}

fn string_payload(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("entry-{i:04}-αβγ \"quoted\"")).collect()
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for &len in &[16usize, 256, 4096] {
        let ints = int_payload(len);
        let strings = string_payload(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("utf8/i64", len), &ints, |b, v| {
            b.iter(|| utf8::to_bytes(black_box(v)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf16/i64", len), &ints, |b, v| {
            b.iter(|| utf16::to_units(black_box(v)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf8/string", len), &strings, |b, v| {
            b.iter(|| utf8::to_bytes(black_box(v)).unwrap());
        });
    }
    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    for &len in &[16usize, 256, 4096] {
        let bytes = utf8::to_bytes(&int_payload(len)).unwrap();
        let units = utf16::to_units(&int_payload(len)).unwrap();
        let string_bytes = utf8::to_bytes(&string_payload(len)).unwrap();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("utf8/i64", len), &bytes, |b, v| {
            b.iter(|| utf8::from_slice::<Vec<i64>>(black_box(v)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf16/i64", len), &units, |b, v| {
            b.iter(|| utf16::from_units::<Vec<i64>>(black_box(v)).unwrap());
        });
        group.bench_with_input(
            BenchmarkId::new("utf8/string", len),
            &string_bytes,
            |b, v| {
                b.iter(|| utf8::from_slice::<Vec<String>>(black_box(v)).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
