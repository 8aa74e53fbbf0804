use lonetree::anomaly::isolation_forest::{ForestConfig, IsolationForest};
use lonetree::common::Label;
use lonetree::datasets::synthetic::{GaussianCloud, UniformBox};
use lonetree::metrics::confusion::ConfusionMatrix;
use lonetree::metrics::rocauc::roc_auc;
use ndarray::{concatenate, Axis};
use std::time::Instant;

fn main() {
    let now = Instant::now();

    // PARAMETERS
    let num_train: usize = 200;
    let num_test_inliers: usize = 100;
    let num_outliers: usize = 20;
    let config = ForestConfig::default()
        .with_num_trees(100)
        .with_sub_sample_size(128)
        .with_contamination(0.05)
        .with_seed(42);

    // INITIALIZATION
    let train = GaussianCloud::sample::<f64>(num_train, &[0.0, 0.0], 0.5, 1);
    let test_inliers = GaussianCloud::sample::<f64>(num_test_inliers, &[0.0, 0.0], 0.5, 2);
    let planted_outliers = UniformBox::sample::<f64>(num_outliers, 2, 20.0, 50.0, 3);

    let mut forest = IsolationForest::new(config).unwrap();
    forest.fit(&train.view()).unwrap();

    // EVALUATION
    let test = concatenate(Axis(0), &[test_inliers.view(), planted_outliers.view()]).unwrap();
    let mut y_true = vec![Label::Inlier; num_test_inliers];
    y_true.extend(vec![Label::Outlier; num_outliers]);

    let scores = forest.anomaly_scores(&test.view()).unwrap();
    let y_pred = forest.predict(&test.view()).unwrap();

    let cm: ConfusionMatrix<f64> = ConfusionMatrix::from_labels(&y_true, &y_pred);
    let auc = roc_auc::<f64>(scores.as_slice().unwrap(), &y_true).unwrap();

    println!("threshold: {:.4}", forest.threshold().unwrap());
    println!(
        "inliers flagged as outliers: {} / {}",
        cm.false_positives() as usize,
        num_test_inliers
    );
    println!(
        "outliers missed: {} / {}",
        cm.false_negatives() as usize,
        num_outliers
    );
    println!("accuracy: {:.2}%", cm.accuracy() * 100.0);
    println!("ROCAUC: {:.2}%", auc * 100.0);

    let elapsed_time = now.elapsed();
    println!("Took {}ms", elapsed_time.as_millis());
}
