use codec_fs::{NormalizedPath, io};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

fn write_atomic_benchmark(c: &mut Criterion) {
    c.bench_function("io::write_atomic", |b| {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("settings.cfg"));
        let content = "TargetDirectories = /a,/b\nVerbosity = DEBUG\n".as_bytes();

        b.iter(|| {
            io::write_atomic(black_box(&path), black_box(content)).unwrap();
        })
    });
}

fn normalize_benchmark(c: &mut Criterion) {
    c.bench_function("NormalizedPath::new", |b| {
        b.iter(|| NormalizedPath::new(black_box("conf\\..\\shared/./team//codec.cfg")))
    });
}

criterion_group!(benches, write_atomic_benchmark, normalize_benchmark);
criterion_main!(benches);
