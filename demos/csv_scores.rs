use csv::WriterBuilder;
use lonetree::anomaly::isolation_forest::{ForestConfig, IsolationForest};
use lonetree::data::csv::read_matrix_from_path;
use lonetree::datasets::synthetic::{GaussianCloud, UniformBox};
use ndarray::{concatenate, Axis};
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Scores every row of a CSV feature matrix and writes `scores.csv`.
/// A synthetic input file is materialized on the first run.
fn main() {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("points.csv"));

    if !Path::new(&input_path).exists() {
        write_synthetic_points(&input_path);
    }

    let x = read_matrix_from_path::<f64, _>(&input_path, false).unwrap();
    println!("{} rows, {} features", x.nrows(), x.ncols());

    let start = Instant::now();

    let config = ForestConfig::default().with_seed(42);
    let mut forest = IsolationForest::new(config).unwrap();
    forest.fit(&x.view()).unwrap();
    let scores = forest.anomaly_scores(&x.view()).unwrap();

    let file = File::create("scores.csv").unwrap();
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(file);
    for score in scores.iter() {
        csv_writer.serialize(score).unwrap();
    }
    csv_writer.flush().unwrap();

    println!("wrote {} scores to scores.csv", scores.len());
    println!("Took {}ms", start.elapsed().as_millis());
}

fn write_synthetic_points(path: &str) {
    let cluster = GaussianCloud::sample::<f64>(1000, &[0.0, 0.0], 1.0, 11);
    let outliers = UniformBox::sample::<f64>(25, 2, 15.0, 40.0, 12);
    let points = concatenate(Axis(0), &[cluster.view(), outliers.view()]).unwrap();

    let file = File::create(path).unwrap();
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(file);
    for row in points.rows() {
        csv_writer.serialize(row.to_vec()).unwrap();
    }
    csv_writer.flush().unwrap();
    println!("materialized {} synthetic rows at {}", points.nrows(), path);
}
