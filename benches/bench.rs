// Criterion benchmarks for Shabbat Match

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shabbat_match::core::{derive_status, match_ids};
use shabbat_match::models::{Match, OneOrMany};

fn create_match(id: i64) -> Match {
    Match {
        id,
        student_request_id: id / 3,
        host_id: 100 + id % 7,
        host_confirmed: id % 2 == 0,
        student_confirmed: id % 3 == 0,
        created_at: Utc::now(),
    }
}

fn bench_derive_status(c: &mut Criterion) {
    let record = create_match(6);
    c.bench_function("derive_status", |b| {
        b.iter(|| derive_status(black_box(&record)));
    });
}

fn bench_normalize_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_lookup");

    for size in [1, 10, 100, 1000].iter() {
        let matches: Vec<Match> = (0..*size).map(create_match).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &matches, |b, matches| {
            b.iter(|| match_ids(black_box(OneOrMany::from_vec(matches.clone()))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_derive_status, bench_normalize_lookup);
criterion_main!(benches);
