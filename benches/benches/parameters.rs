// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_parameter` writes.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_parameter::{Color3, ParamStore, Parameter};

fn bench_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parameter/write");

    group.bench_function("scalar_set", |b| {
        let mut store = ParamStore::new();
        let p = store.register(Parameter::builder(0.0_f64).range(0.0, 1.0).build());
        let mut v = 0.0;
        b.iter(|| {
            v = if v > 1.0 { 0.0 } else { v + 0.01 };
            store.set(p, black_box(v)).unwrap();
        });
    });

    group.bench_function("color_components", |b| {
        let mut store = ParamStore::new();
        let p = store.register(Parameter::builder(Color3::default()).range(0.0, 1.0).build());
        b.iter(|| {
            store
                .set_components(p.id(), 0, black_box(&[0.2, 0.4, 0.6]))
                .unwrap();
        });
    });

    group.bench_function("enum_select", |b| {
        let mut store = ParamStore::new();
        let p = store.register(
            Parameter::builder(0_i32)
                .enumeration([("A", 0), ("B", 1), ("C", 2)])
                .build(),
        );
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % 3;
            store.select_enum(p.id(), black_box(i)).unwrap();
        });
    });

    group.bench_function("drain_dirty_1k", |b| {
        b.iter_batched(
            || {
                let mut store = ParamStore::new();
                for i in 0..1000 {
                    let p = store.register(Parameter::builder(0.0_f64).build());
                    store.set(p, f64::from(i)).unwrap();
                }
                store
            },
            |mut store| black_box(store.drain_dirty()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_writes);
criterion_main!(benches);
