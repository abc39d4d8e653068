use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rlhex::codec::{BuiltinCodec, Codec};
use rlhex::file_handler::ByteStore;
use rlhex::format::{LineFormatter, LineOptions};

fn random_store(size: usize) -> ByteStore {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut content = vec![0u8; size];
    rng.fill(&mut content[..]);
    ByteStore::from_bytes(content)
}

fn bench_single_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_line");
    let store = random_store(64 * 1024);
    let formatter = LineFormatter::new();

    for name in ["ascii", "utf-8", "windows-1252", "utf-16-le", "koi8-r"] {
        let codec = Codec::resolve(name).unwrap();
        group.bench_with_input(BenchmarkId::new("codec", name), &codec, |b, codec| {
            let options = LineOptions::new(codec);
            b.iter(|| black_box(formatter.format_line(&store, black_box(4096), &options)));
        });
    }

    let codec = Codec::Builtin(BuiltinCodec::Ascii);
    group.bench_function("shifted", |b| {
        let options = LineOptions::new(&codec).with_shift(5);
        b.iter(|| black_box(formatter.format_line(&store, black_box(3), &options)));
    });

    group.finish();
}

fn bench_visible_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_lines");
    let store = random_store(1024 * 1024);
    let formatter = LineFormatter::new();
    let codec = Codec::Builtin(BuiltinCodec::Latin1);

    for rows in [24usize, 60, 200] {
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, &rows| {
            let options = LineOptions::new(&codec);
            b.iter(|| black_box(formatter.visible_lines(&store, 512 * 1024, rows, &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_line, bench_visible_page);
criterion_main!(benches);
