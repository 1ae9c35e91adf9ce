mod util;

use pprof::criterion::{Output, PProfProfiler};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depthplanes::{build_adjacency, split, PlaneConstants};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");
    group.sample_size(50);

    let grid = util::create_checkerboard(512, 512, 8);
    let constants = PlaneConstants::default();
    let arena = split(&grid, &constants);

    group.bench_function("checkerboard_512x512", |b| {
        b.iter_batched(
            || arena.clone(),
            |mut arena| {
                build_adjacency(black_box(&mut arena));
                black_box(arena);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
