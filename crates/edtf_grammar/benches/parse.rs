use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edtf_grammar::{canonicalize, parse};

const LEVEL_0: &str = "1985-04-12T23:20:30+04:30";
const LEVEL_1: &str = "2004-06?/2006-08~";
const LEVEL_2: &str = "[1667, 1668, 1670..1672, 2004?-(06)~-(11)?]";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse");

    group.bench_function("Level 0", |b| {
        b.iter(|| parse(black_box(LEVEL_0)).unwrap())
    });

    group.bench_function("Level 1", |b| {
        b.iter(|| parse(black_box(LEVEL_1)).unwrap())
    });

    group.bench_function("Level 2", |b| {
        b.iter(|| parse(black_box(LEVEL_2)).unwrap())
    });

    group.bench_function("Rejected", |b| {
        b.iter(|| parse(black_box("2004-06-11T25")).unwrap_err())
    });

    group.finish();

    let mut group = c.benchmark_group("Canonicalize");

    group.bench_function("Level 2", |b| {
        b.iter(|| canonicalize(black_box("{1667,1668, 156X-12-2X}")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
