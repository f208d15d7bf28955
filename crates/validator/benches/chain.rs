use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use verity_validator::prelude::*;

fn bench_passing_chain(c: &mut Criterion) {
    let factory = ValidatorFactory::new();
    c.bench_function("require_that_passing", |b| {
        b.iter(|| {
            factory
                .require_that(black_box(42_i64), "age")
                .is_not_negative()
                .is_less_than(150)
                .into_value()
        });
    });
}

fn bench_collected_failures(c: &mut Criterion) {
    let eager = ValidatorFactory::new();
    eager.update_configuration_with(|updater| {
        updater.set_lazy_exceptions(false);
    });
    let lazy = ValidatorFactory::new();

    let mut group = c.benchmark_group("check_if_failing");
    for (label, factory) in [("eager", &eager), ("lazy", &lazy)] {
        group.bench_function(label, |b| {
            b.iter(|| {
                factory
                    .check_if(black_box(String::from("first line\nsecond line")), "text")
                    .is_equal_to(&String::from("first line\nsecond lime"))
                    .validation_failed()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_passing_chain, bench_collected_failures);
criterion_main!(benches);
