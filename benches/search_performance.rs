use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rlhex::codec::{BuiltinCodec, Codec};
use rlhex::file_handler::{ByteStore, ByteStoreFactory};
use rlhex::search::SearchEngine;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Random binary content with a marker and a little-endian 1000 every `marker_every` bytes
fn create_binary_with_markers(size_kb: usize, marker_every: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut content = vec![0u8; size_kb * 1024];
    rng.fill(&mut content[..]);

    let mut pos = 0;
    while pos + 16 < content.len() {
        content[pos..pos + 6].copy_from_slice(b"MARKER");
        content[pos + 8..pos + 12].copy_from_slice(&1000u32.to_le_bytes());
        pos += marker_every;
    }
    content
}

fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn bench_search_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_queries");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let sizes_kb = [100, 5000, 60000];
    let codec = Codec::Builtin(BuiltinCodec::Ascii);

    for &size_kb in &sizes_kb {
        let temp_file = write_temp(&create_binary_with_markers(size_kb, 4096));
        let store = ByteStoreFactory::open(temp_file.path()).unwrap();
        let engine = SearchEngine::new(Arc::new(store));

        let size_label = if size_kb < 1024 {
            format!("{}KB", size_kb)
        } else {
            format!("{}MB", size_kb / 1024)
        };

        group.bench_with_input(BenchmarkId::new("text", &size_label), &engine, |b, eng| {
            b.iter(|| black_box(eng.search("MARKER", 0, &codec)));
        });

        group.bench_with_input(BenchmarkId::new("hex", &size_label), &engine, |b, eng| {
            b.iter(|| black_box(eng.search("0x4d41524b4552", 0, &codec)));
        });

        // ascii + int16 + int32 + float32 candidates, six scans in total
        group.bench_with_input(BenchmarkId::new("numeric", &size_label), &engine, |b, eng| {
            b.iter(|| black_box(eng.search("1000", 0, &codec)));
        });
    }

    group.finish();
}

fn bench_hit_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_navigation");
    group.measurement_time(Duration::from_secs(2));

    let codec = Codec::Builtin(BuiltinCodec::Ascii);
    let engine = SearchEngine::new(Arc::new(ByteStore::from_bytes(
        create_binary_with_markers(8192, 256),
    )));
    let results = engine.search("1000", 0, &codec);

    group.bench_function("next_cycle", |b| {
        let mut results = results.clone();
        b.iter(|| black_box(results.next()));
    });

    group.bench_function("nearest", |b| {
        b.iter(|| black_box(results.nearest(black_box(4 * 1024 * 1024))));
    });

    group.finish();
}

criterion_group!(benches, bench_search_queries, bench_hit_navigation);
criterion_main!(benches);
