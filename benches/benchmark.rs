use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use city_planner::{AvlTree, CityGraph};

const N: usize = 100_000;
const LOCATIONS: usize = 2_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();
    let names: Vec<String> = (0..LOCATIONS).map(|i| format!("Location {i}")).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    let tree: AvlTree<i32> = values.iter().copied().collect();

    c.bench_function("tree_contains", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.contains(value));
            }
        })
    });

    c.bench_function("tree_iter", |b| {
        b.iter(|| {
            for key in &tree {
                black_box(key);
            }
        })
    });

    let mut graph = CityGraph::new();
    for name in &names {
        let _ = graph.add_location(name);
    }
    for _ in 0..(LOCATIONS * 4) {
        let src = &names[rng.gen_range(0..LOCATIONS)];
        let dest = &names[rng.gen_range(0..LOCATIONS)];
        let _ = graph.add_road(src, dest);
    }

    c.bench_function("graph_bfs", |b| {
        b.iter(|| {
            for name in graph.bfs(&names[0]).into_iter().flatten() {
                black_box(name);
            }
        })
    });

    c.bench_function("graph_remove_location", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            for name in names.iter().step_by(10) {
                let _ = graph.remove_location(name);
            }
            graph
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
