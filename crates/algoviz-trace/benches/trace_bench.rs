//! Benchmarks for trace generation
//!
//! Inputs are the size a user types in by hand (a few dozen values), which
//! is the case generation has to be instant for.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use algoviz_trace::{
    bfs, binary_search, bubble_sort, dijkstra, heap_sort, linear_search, merge_sort, prim,
    quick_sort, Graph, NodeId, StepTrace,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

type SortFn = fn(&[f64]) -> algoviz_trace::Result<StepTrace>;

fn input(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    algoviz_trace::random_values(len, &mut rng)
}

/// Benchmark each sort on random arrays
fn bench_sorts(c: &mut Criterion) {
    let sorts: [(&str, SortFn); 4] = [
        ("bubble", bubble_sort),
        ("heap", heap_sort),
        ("quick", quick_sort),
        ("merge", merge_sort),
    ];

    for (name, sort) in sorts {
        let mut group = c.benchmark_group(format!("{name}_sort"));
        for &len in &[7usize, 20, 50] {
            let values = input(len);
            group.throughput(Throughput::Elements(len as u64));
            group.bench_with_input(BenchmarkId::from_parameter(len), &values, |b, v| {
                b.iter(|| sort(black_box(v)))
            });
        }
        group.finish();
    }
}

/// Benchmark searches, target absent so every index is visited
fn bench_searches(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let values = input(20);

    group.bench_function("linear", |b| b.iter(|| linear_search(black_box(&values), 99.0)));
    group.bench_function("binary", |b| b.iter(|| binary_search(black_box(&values), 99.0)));
    group.bench_function("bfs", |b| b.iter(|| bfs(black_box(&values))));
    group.finish();
}

/// Benchmark graph algorithms on the sample graph
fn bench_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    let graph = Graph::sample_weighted();

    group.bench_function("dijkstra", |b| b.iter(|| dijkstra(black_box(&graph), NodeId(0))));
    group.bench_function("prim", |b| b.iter(|| prim(black_box(&graph), NodeId(0))));
    group.finish();
}

criterion_group!(benches, bench_sorts, bench_searches, bench_graphs);
criterion_main!(benches);
