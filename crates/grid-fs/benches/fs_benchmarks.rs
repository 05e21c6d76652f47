use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grid_fs::io::{self, RobustnessConfig};
use grid_fs::{ContentDigest, NormalizedPath};
use std::fs;
use tempfile::tempdir;

fn content_digest_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Road 96_grid_1466640.png");
    // Typical grid capsule size
    fs::write(&path, vec![0x5a; 600 * 1024]).unwrap();

    c.bench_function("ContentDigest::of_file (600 KiB)", |b| {
        b.iter(|| ContentDigest::of_file(black_box(&path)).unwrap())
    });

    let missing = dir.path().join("missing.png");
    c.bench_function("ContentDigest::of_file (absent)", |b| {
        b.iter(|| ContentDigest::of_file(black_box(&missing)).unwrap())
    });
}

fn copy_atomic_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Road 96_grid_1466640.png");
    fs::write(&source, vec![0x5a; 600 * 1024]).unwrap();
    let dest = NormalizedPath::new(dir.path().join("1466640p.png"));

    c.bench_function("io::copy_atomic (600 KiB)", |b| {
        b.iter(|| {
            io::copy_atomic(black_box(&source), black_box(&dest), RobustnessConfig::default())
                .unwrap();
        })
    });
}

criterion_group!(benches, content_digest_benchmark, copy_atomic_benchmark);
criterion_main!(benches);
