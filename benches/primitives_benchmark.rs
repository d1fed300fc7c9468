use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use forkjoin_bfs::{BlockSize, ForkJoinPool};

const LEN: usize = 1 << 22;

fn bench_scan(c: &mut Criterion) {
    let data: Vec<u64> = (0..LEN as u64).map(|i| i % 7).collect();
    let mut group = c.benchmark_group("scan");

    group.bench_function("sequential", |b| {
        let mut buf = data.clone();
        b.iter(|| {
            buf.copy_from_slice(&data);
            let mut acc = 0u64;
            for x in &mut buf {
                let v = *x;
                *x = acc;
                acc += v;
            }
            black_box(acc)
        });
    });

    for block in [BlockSize::Sqrt, BlockSize::Fixed(4096)] {
        let pool = ForkJoinPool::with_block_size(4, block).unwrap();
        let mut buf = data.clone();
        group.bench_with_input(BenchmarkId::new("parallel", block), &block, |b, _| {
            b.iter(|| {
                buf.copy_from_slice(&data);
                black_box(pool.parallel_scan_sum(&mut buf))
            });
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    // Roughly one survivor in eight, like a sparse BFS expansion buffer.
    let data: Vec<usize> = (0..LEN).map(|i| if i % 8 == 3 { i } else { 0 }).collect();
    let mut group = c.benchmark_group("filter");

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(data.iter().copied().filter(|&x| x != 0).collect::<Vec<_>>()));
    });

    let pool = ForkJoinPool::with_block_size(4, BlockSize::Sqrt).unwrap();
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(pool.parallel_filter(&data, |&x| x != 0)));
    });

    let mut flags = vec![0usize; LEN];
    let mut dst = vec![0usize; LEN];
    group.bench_function("parallel_into", |b| {
        b.iter(|| black_box(pool.parallel_filter_into(&data, &mut flags, &mut dst, |&x| x != 0)));
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_filter);
criterion_main!(benches);
