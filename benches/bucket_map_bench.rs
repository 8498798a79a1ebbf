use bucket_map::BucketMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use std::time::Duration;

// Dense integer keys hash to themselves, so the table stays near the key
// count. Scattered keys would grow it with the square of the key count.
const DENSE: u64 = 10_000;

fn key(n: u64) -> String {
    format!("k{:04}", n)
}

fn dense_map() -> BucketMap<u64, u64> {
    (0..DENSE).map(|k| (k, k)).collect()
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_map::set");
    group.throughput(Throughput::Elements(DENSE));
    group.bench_function("dense_fresh_10k", |b| {
        b.iter_batched(
            BucketMap::<u64, u64>::new,
            |mut m| {
                for k in 0..DENSE {
                    m.set(k, k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("dense_replace_10k", |b| {
        b.iter_batched(
            dense_map,
            |mut m| {
                for k in 0..DENSE {
                    m.set(k, k + 1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_map::get");
    let m = dense_map();
    group.bench_function("dense_hit", |b| {
        let mut it = (0..DENSE).cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(&k).ok());
        })
    });
    group.bench_function("dense_miss", |b| {
        let mut it = (DENSE..2 * DENSE).cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get_or(&k, &0));
        })
    });

    let small: BucketMap<String, u64> = (0..32).map(|i| (key(i), i)).collect();
    group.bench_function("string_hit", |b| {
        let keys: Vec<String> = (0..32).map(key).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(small.get(k.as_str()).ok());
        })
    });
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_map::delete");
    group.throughput(Throughput::Elements(DENSE));
    group.bench_function("dense_all_10k", |b| {
        b.iter_batched(
            dense_map,
            |mut m| {
                for k in 0..DENSE {
                    let _ = black_box(m.delete(&k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_map::growth");
    // 0..1023 fills the initial table; 1023 lands on slot 0 and forces a rehash.
    group.bench_function("rehash_1023", |b| {
        b.iter_batched(
            || (0..1023u64).map(|k| (k, k)).collect::<BucketMap<_, _>>(),
            |mut m| {
                m.set(1023, 1023);
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_set, bench_get, bench_delete, bench_growth
}
criterion_main!(benches);
