use criterion::{black_box, criterion_group, criterion_main, Criterion};
use id3tree::{best_attribute, entropy, DecisionTree, NoopObserver, TreeBuilder};
use std::sync::Arc;
use std::time::Duration;

// data generating
// functions
mod utils;
use utils::create_data;

pub fn criterion_benchmarks(c: &mut Criterion) {
    let data = create_data(5_000, 8, 4);

    c.bench_function("entropy", |b| b.iter(|| entropy(black_box(&data)).unwrap()));
    c.bench_function("best_attribute", |b| {
        b.iter(|| best_attribute(black_box(&data), black_box(data.attributes())).unwrap())
    });

    let mut tree_train = c.benchmark_group("train_tree");
    tree_train.measurement_time(Duration::from_secs(10));
    tree_train.bench_function("train_tree_sequential", |b| {
        b.iter(|| {
            TreeBuilder::default()
                .set_observer(Arc::new(NoopObserver))
                .build(black_box(&data))
                .unwrap()
        })
    });
    tree_train.bench_function("train_tree_parallel", |b| {
        b.iter(|| {
            TreeBuilder::default()
                .set_parallel(true)
                .set_observer(Arc::new(NoopObserver))
                .build(black_box(&data))
                .unwrap()
        })
    });
    tree_train.finish();

    let tree = DecisionTree::fit(&data).unwrap().unwrap();
    c.bench_function("predict_batch", |b| {
        b.iter(|| tree.predict_batch(black_box(data.records()), false))
    });
}

criterion_group!(benches, criterion_benchmarks);
criterion_main!(benches);
