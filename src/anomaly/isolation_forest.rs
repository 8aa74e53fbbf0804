use std::cmp::Ordering;

use ndarray::{Array1, ArrayView2};
use rayon::prelude::*;

use crate::anomaly::isolation_tree::IsolationTree;
use crate::anomaly::path_length::{default_max_depth, expected_path_length};
use crate::anomaly::sampler;
use crate::common::{AnomalyDetector, Error, FType, Label, ScoreResult};
use crate::data::view::DatasetView;

/// Isolation-forest configuration.
///
/// # Parameters
///
/// - `num_trees`: ensemble size (default 100).
/// - `sub_sample_size`: rows drawn without replacement per tree, clipped
///   to the training size at fit time (default 256).
/// - `contamination`: expected fraction of outliers in the training set,
///   in `(0, 0.5]`; calibrates the decision threshold (default 0.1).
/// - `max_depth`: tree-height cutoff; `None` means
///   `ceil(log2(sub_sample_size))`.
/// - `seed`: base seed for reproducible forests; `None` draws one at
///   model construction.
#[derive(Debug, Clone)]
pub struct ForestConfig<F: FType> {
    pub num_trees: usize,
    pub sub_sample_size: usize,
    pub contamination: F,
    pub max_depth: Option<usize>,
    pub seed: Option<u64>,
}

impl<F: FType> Default for ForestConfig<F> {
    fn default() -> Self {
        Self {
            num_trees: 100,
            sub_sample_size: 256,
            contamination: F::from_f64(0.1).unwrap(),
            max_depth: None,
            seed: None,
        }
    }
}

impl<F: FType> ForestConfig<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_trees(mut self, num_trees: usize) -> Self {
        self.num_trees = num_trees;
        self
    }

    pub fn with_sub_sample_size(mut self, sub_sample_size: usize) -> Self {
        self.sub_sample_size = sub_sample_size;
        self
    }

    pub fn with_contamination(mut self, contamination: F) -> Self {
        self.contamination = contamination;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_trees == 0 {
            return Err(Error::InvalidConfiguration(
                "num_trees must be at least 1".to_string(),
            ));
        }
        if self.sub_sample_size == 0 {
            return Err(Error::InvalidConfiguration(
                "sub_sample_size must be at least 1".to_string(),
            ));
        }
        let half = F::from_f64(0.5).unwrap();
        if self.contamination <= F::zero() || self.contamination > half {
            return Err(Error::InvalidConfiguration(
                "contamination must lie in (0, 0.5]".to_string(),
            ));
        }
        Ok(())
    }
}

// Everything `fit` produces, replaced wholesale on refit.
struct Fitted<F: FType> {
    trees: Vec<IsolationTree<F>>,
    num_features: usize,
    sub_sample_size: usize,
    threshold: F,
}

/// Ensemble of isolation trees with a contamination-calibrated decision
/// threshold.
///
/// # Example
///
/// ```
/// use lonetree::anomaly::isolation_forest::{ForestConfig, IsolationForest};
/// use lonetree::common::Label;
/// use lonetree::datasets::synthetic::GaussianCloud;
/// use ndarray::array;
///
/// let train = GaussianCloud::sample::<f64>(256, &[0.0, 0.0], 0.5, 7);
/// let config = ForestConfig::default().with_num_trees(50).with_seed(42);
///
/// let mut forest = IsolationForest::new(config).unwrap();
/// forest.fit(&train.view()).unwrap();
///
/// let faraway = array![[50.0, 50.0]];
/// let labels = forest.predict(&faraway.view()).unwrap();
/// assert_eq!(labels, vec![Label::Outlier]);
/// ```
pub struct IsolationForest<F: FType> {
    config: ForestConfig<F>,
    base_seed: u64,
    fitted: Option<Fitted<F>>,
}

impl<F: FType> IsolationForest<F> {
    /// Validates the configuration and resolves the base seed. An unseeded
    /// model draws one here and keeps it, so refits stay reproducible per
    /// instance.
    pub fn new(config: ForestConfig<F>) -> Result<Self, Error> {
        config.validate()?;
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            base_seed,
            fitted: None,
        })
    }

    /// Builds the ensemble: one sub-sample and one tree per ensemble
    /// member, each from its own random sub-stream, then calibrates the
    /// decision threshold as the `(1 - contamination)`-quantile of the
    /// training scores. Any previous fit is discarded.
    pub fn fit(&mut self, x: &ArrayView2<'_, F>) -> Result<(), Error> {
        let view = DatasetView::new(x.view())?;
        let num_rows = view.num_rows();
        let sub_sample_size = self.config.sub_sample_size.min(num_rows);
        let max_depth = self
            .config
            .max_depth
            .unwrap_or_else(|| default_max_depth(sub_sample_size));

        let base_seed = self.base_seed;
        let trees: Vec<IsolationTree<F>> = (0..self.config.num_trees as u64)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = sampler::sub_stream(base_seed, tree_index);
                let rows =
                    sampler::sample_without_replacement(&mut rng, num_rows, sub_sample_size);
                IsolationTree::build(&view, rows, max_depth, &mut rng)
            })
            .collect();

        let training_scores = raw_scores(&trees, sub_sample_size, &view);
        let threshold = contamination_threshold(&training_scores, self.config.contamination);

        self.fitted = Some(Fitted {
            trees,
            num_features: view.num_features(),
            sub_sample_size,
            threshold,
        });
        Ok(())
    }

    /// Normalized anomaly score per row, in `(0, 1]`. Rows near 1 isolate
    /// far faster than expected; rows at or below 0.5 look normal.
    pub fn anomaly_scores(&self, x: &ArrayView2<'_, F>) -> Result<Array1<F>, Error> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let view = DatasetView::new(x.view())?;
        if view.num_features() != fitted.num_features {
            return Err(Error::DimensionMismatch {
                expected: fitted.num_features,
                found: view.num_features(),
            });
        }
        Ok(raw_scores(&fitted.trees, fitted.sub_sample_size, &view))
    }

    /// ±1 label per row: `Outlier` where the score reaches the fit-time
    /// threshold, `Inlier` otherwise.
    pub fn predict(&self, x: &ArrayView2<'_, F>) -> Result<Vec<Label>, Error> {
        let scores = self.anomaly_scores(x)?;
        let threshold = self.threshold()?;
        Ok(scores
            .iter()
            .map(|&score| label_for(score, threshold))
            .collect())
    }

    /// Score and label per row in one pass.
    pub fn score_results(&self, x: &ArrayView2<'_, F>) -> Result<Vec<ScoreResult<F>>, Error> {
        let scores = self.anomaly_scores(x)?;
        let threshold = self.threshold()?;
        Ok(scores
            .iter()
            .map(|&score| ScoreResult {
                score,
                label: label_for(score, threshold),
            })
            .collect())
    }

    /// Decision threshold calibrated during `fit`.
    pub fn threshold(&self) -> Result<F, Error> {
        self.fitted
            .as_ref()
            .map(|fitted| fitted.threshold)
            .ok_or(Error::NotFitted)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn config(&self) -> &ForestConfig<F> {
        &self.config
    }
}

impl<F: FType> AnomalyDetector<F> for IsolationForest<F> {
    fn fit(&mut self, x: &ArrayView2<'_, F>) -> Result<(), Error> {
        IsolationForest::fit(self, x)
    }

    fn anomaly_scores(&self, x: &ArrayView2<'_, F>) -> Result<Array1<F>, Error> {
        IsolationForest::anomaly_scores(self, x)
    }

    fn predict(&self, x: &ArrayView2<'_, F>) -> Result<Vec<Label>, Error> {
        IsolationForest::predict(self, x)
    }
}

fn label_for<F: FType>(score: F, threshold: F) -> Label {
    if score >= threshold {
        Label::Outlier
    } else {
        Label::Inlier
    }
}

// s(x) = 2^(-E[h(x)] / c(psi)), one row at a time across the ensemble.
// Each row is an independent reduction, so scoring parallelizes per row
// without any shared accumulator.
fn raw_scores<F: FType>(
    trees: &[IsolationTree<F>],
    sub_sample_size: usize,
    view: &DatasetView<'_, F>,
) -> Array1<F> {
    let normalizer = expected_path_length::<F>(sub_sample_size);
    let num_trees = F::from_usize(trees.len()).unwrap();
    let two = F::from_f64(2.0).unwrap();

    let scores: Vec<F> = (0..view.num_rows())
        .into_par_iter()
        .map(|row_index| {
            let row = view.row(row_index);
            let mut total = F::zero();
            for tree in trees {
                total += tree.path_length(&row);
            }
            let mean = total / num_trees;
            if normalizer > F::zero() {
                two.powf(-(mean / normalizer))
            } else {
                // Sub-sample of one: every tree is a bare leaf and the
                // normalizer degenerates, so every row scores 1.
                F::one()
            }
        })
        .collect();
    Array1::from_vec(scores)
}

// Cutoff such that roughly `contamination` of the training scores land at
// or above it: the (1 - contamination)-quantile of the sorted scores.
fn contamination_threshold<F: FType>(scores: &Array1<F>, contamination: F) -> F {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    let cut = ((1.0 - contamination.to_f64().unwrap()) * n as f64).floor() as usize;
    sorted[cut.min(n - 1)]
}
