//! Benchmark: Walkington rule construction
//!
//! Compares float and exact construction cost per scheme.
//!
//! Run with:
//!   cargo bench -p math-audio-nsimplex --bench walkington_rules

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_audio_nsimplex::{ExactArithmetic, FloatArithmetic, Scheme, SimplexRule};
use std::time::Duration;

fn supported_cases() -> Vec<(Scheme, usize)> {
    let mut cases = Vec::new();
    for scheme in Scheme::ALL {
        for d in [2, 3, 8] {
            if scheme.supports_dimension(d) {
                cases.push((scheme, d));
            }
        }
    }
    cases
}

fn bench_float_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("walkington_float");
    group.measurement_time(Duration::from_secs(3));

    for (scheme, d) in supported_cases() {
        let id = BenchmarkId::new(scheme.to_string(), d);
        group.bench_with_input(id, &d, |b, &d| {
            b.iter(|| black_box(SimplexRule::walkington(d, scheme.index(), &FloatArithmetic)));
        });
    }

    group.finish();
}

fn bench_exact_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("walkington_exact");
    group.measurement_time(Duration::from_secs(3));

    for (scheme, d) in supported_cases() {
        let id = BenchmarkId::new(scheme.to_string(), d);
        group.bench_with_input(id, &d, |b, &d| {
            b.iter(|| black_box(SimplexRule::walkington(d, scheme.index(), &ExactArithmetic)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_float_rules, bench_exact_rules);
criterion_main!(benches);
