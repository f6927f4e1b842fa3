use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use rtkit_collections::{Map, Set};

fn bench_insert_lookup(c: &mut Criterion) {
    c.bench_function("set_add_10k", |b| {
        b.iter(|| {
            let set = Set::new();
            for i in 0..10_000u32 {
                set.add(black_box(i));
            }
            set
        })
    });

    let map: Map<u32, u32> = (0..10_000).map(|i| (i, i * 2)).collect();
    c.bench_function("map_get_hit", |b| b.iter(|| map.get(black_box(&5_000))));
}

fn bench_churn(c: &mut Criterion) {
    // Delete-heavy workload exercising tombstones and compaction.
    c.bench_function("map_churn_with_walk", |b| {
        b.iter_batched(
            || (0..4_096u32).map(|i| (i, i)).collect::<Map<u32, u32>>(),
            |map| {
                map.for_each(|_, k, m| {
                    if k % 3 == 0 {
                        m.delete(k);
                    }
                });
                for i in 0..4_096u32 {
                    map.delete(&i);
                    map.set(i + 4_096, i);
                }
                map.size()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_insert_lookup, bench_churn);
criterion_main!(benches);
