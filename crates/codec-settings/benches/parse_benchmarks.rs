use codec_fs::NormalizedPath;
use codec_settings::{CliOverrides, Defaults, SavePlan, Settings, Value, coerce, parse_line, resolve_file};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

fn coerce_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    group.bench_function("scalar", |b| b.iter(|| coerce(black_box("bright green"))));
    group.bench_function("sequence", |b| {
        b.iter(|| coerce(black_box("/src, /tests; /benches, none, 42, yes")))
    });
    group.finish();
}

fn parse_line_benchmark(c: &mut Criterion) {
    c.bench_function("parse_line", |b| {
        b.iter(|| parse_line(black_box(r"RegexFilters = a\=b, c\#d  # escaped separators")))
    });
}

fn resolve_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut root = String::from("configfile = team.cfg\n");
    for i in 0..200 {
        root.push_str(&format!("# setting {i}\nKey{i} = value{i}, {i}\n"));
    }
    std::fs::write(dir.path().join(".codecfile"), root).unwrap();
    std::fs::write(dir.path().join("team.cfg"), "Verbosity = DEBUG\nLogType = TXT\n").unwrap();
    let path = NormalizedPath::new(dir.path().join(".codecfile"));

    c.bench_function("resolve_file", |b| b.iter(|| resolve_file(black_box(&path))));

    let cli = CliOverrides::new().with("Verbosity", Some(Value::from("WARN")));
    let settings = Settings::load_from(Defaults::builtin_in(dir.path()), &path, &cli);
    c.bench_function("SavePlan::compute", |b| {
        b.iter(|| SavePlan::compute(black_box(&settings), black_box(&path)))
    });
}

criterion_group!(benches, coerce_benchmark, parse_line_benchmark, resolve_benchmark);
criterion_main!(benches);
