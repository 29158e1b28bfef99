//! Performance benchmarks for stream decoding
//!
//! Measures decode throughput for different transport chunk sizes and for
//! long single events that arrive in many pieces.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use guru_stream::sse::StreamDecoder;

/// Generate a wire body of `events` small text updates plus the sentinel
fn generate_stream(events: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..events {
        body.push_str(&format!(
            "data: {{\"content\":\"Breathe in, breathe out. Step {} — शान्ति \"}}\n\n",
            i
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body.into_bytes()
}

/// Benchmark decoding the same body under different chunk sizes
fn bench_decode_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chunk_sizes");
    let body = generate_stream(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for size in [1, 16, 256, 4096, body.len()].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut decoder = StreamDecoder::new();
                let mut count = 0;
                for chunk in body.chunks(size) {
                    count += decoder.feed(black_box(chunk)).len();
                }
                count += decoder.finish().len();
                black_box(count)
            });
        });
    }

    group.finish();
}

/// Benchmark one large event delivered in small pieces
fn bench_decode_long_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_long_event");

    for kib in [16, 64, 256].iter() {
        let text = "a".repeat(kib * 1024);
        let body = format!("data: {{\"content\":\"{}\"}}\n", text).into_bytes();
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_kib", kib)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut decoder = StreamDecoder::new();
                    let mut count = 0;
                    for chunk in body.chunks(64) {
                        count += decoder.feed(black_box(chunk)).len();
                    }
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode_chunk_sizes, bench_decode_long_event);
criterion_main!(benches);
