use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lonetree::anomaly::isolation_forest::{ForestConfig, IsolationForest};
use lonetree::datasets::synthetic::GaussianCloud;

fn fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    let train = GaussianCloud::sample::<f64>(2048, &[0.0; 8], 1.0, 42);

    for sub_sample_size in [64, 256].iter() {
        for num_trees in [10, 100].iter() {
            let input = (*sub_sample_size, *num_trees);
            group.throughput(Throughput::Elements(*num_trees as u64));
            group.bench_with_input(
                format!("psi={}-trees={}", sub_sample_size, num_trees),
                &input,
                |b, &(sub_sample_size, num_trees)| {
                    b.iter(|| {
                        let config = ForestConfig::default()
                            .with_num_trees(num_trees)
                            .with_sub_sample_size(sub_sample_size)
                            .with_seed(42);
                        let mut forest = IsolationForest::new(config).unwrap();
                        forest.fit(&train.view()).unwrap();
                        forest
                    });
                },
            );
        }
    }
    group.finish();
}

fn score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let train = GaussianCloud::sample::<f64>(2048, &[0.0; 8], 1.0, 42);
    let test = GaussianCloud::sample::<f64>(4096, &[0.0; 8], 1.0, 43);

    let config = ForestConfig::default()
        .with_num_trees(100)
        .with_sub_sample_size(256)
        .with_seed(42);
    let mut forest = IsolationForest::new(config).unwrap();
    forest.fit(&train.view()).unwrap();

    group.throughput(Throughput::Elements(test.nrows() as u64));
    group.bench_function("rows=4096-trees=100", |b| {
        b.iter(|| forest.anomaly_scores(&test.view()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, fit, score);
criterion_main!(benches);
