use criterion::{Criterion, criterion_group, criterion_main};
use knights_tour::tour::backtrack::Recursive;
use knights_tour::tour::graph::MoveGraph;
use knights_tour::tour::heuristic::{DynamicWarnsdorff, FixedOrder, RandomOrder, Warnsdorff};
use knights_tour::tour::iterative::Iterative;
use knights_tour::tour::search::{SearchLimits, TourSearch};
use knights_tour::tour::vertex::Vertex;
use std::hint::black_box;
use std::time::Duration;

const BUDGET: SearchLimits = SearchLimits {
    max_nodes: Some(1000),
};

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph - build");
    group.sample_size(100);

    for n in [8, 16, 32, 64] {
        group.bench_function(format!("{n}x{n}"), |b| {
            b.iter(|| black_box(MoveGraph::new(black_box(n))));
        });
    }

    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let graph = MoveGraph::new(8).expect("valid board");
    let start = Vertex::new(0, 0);

    let mut group = c.benchmark_group("8x8 - move ordering");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Warnsdorff", |b| {
        b.iter(|| {
            let mut engine = Recursive::new(&graph, Warnsdorff, SearchLimits::default());
            black_box(engine.search(start))
        });
    });

    group.bench_function("Dynamic Warnsdorff", |b| {
        b.iter(|| {
            let mut engine = Recursive::new(&graph, DynamicWarnsdorff, SearchLimits::default());
            black_box(engine.search(start))
        });
    });

    group.bench_function("Fixed Order (1000 nodes)", |b| {
        b.iter(|| {
            let mut engine = Recursive::new(&graph, FixedOrder, BUDGET);
            black_box(engine.search(start))
        });
    });

    group.bench_function("Random Order (1000 nodes)", |b| {
        b.iter(|| {
            let mut engine = Recursive::new(&graph, RandomOrder::new(7), BUDGET);
            black_box(engine.search(start))
        });
    });

    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for n in [8, 50] {
        let graph = MoveGraph::new(n).expect("valid board");
        let start = Vertex::new(0, 0);

        group.bench_function(format!("Recursive {n}x{n}"), |b| {
            b.iter(|| {
                let mut engine =
                    Recursive::new(&graph, DynamicWarnsdorff, SearchLimits::default());
                black_box(engine.search(start))
            });
        });

        group.bench_function(format!("Iterative {n}x{n}"), |b| {
            b.iter(|| {
                let mut engine =
                    Iterative::new(&graph, DynamicWarnsdorff, SearchLimits::default());
                black_box(engine.search(start))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_graph, bench_heuristics, bench_engines);
criterion_main!(benches);
