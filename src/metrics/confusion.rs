use std::fmt;

use crate::common::{FType, Label};

/// Confusion matrix for binary outlier labels.
///
/// The outlier class is treated as the positive class, so
/// `true_positives` counts outliers flagged as outliers and
/// `false_positives` counts inliers wrongly flagged.
///
/// # Example
///
/// ```
/// use lonetree::common::Label;
/// use lonetree::metrics::confusion::ConfusionMatrix;
///
/// let y_true = vec![Label::Inlier, Label::Inlier, Label::Outlier, Label::Outlier];
/// let y_pred = vec![Label::Inlier, Label::Outlier, Label::Outlier, Label::Outlier];
///
/// let cm: ConfusionMatrix<f64> = ConfusionMatrix::from_labels(&y_true, &y_pred);
/// assert_eq!(cm.true_positives(), 2.0);
/// assert_eq!(cm.false_positives(), 1.0);
/// assert_eq!(cm.accuracy(), 0.75);
/// ```
#[derive(Clone)]
pub struct ConfusionMatrix<F: FType> {
    true_positives: F,
    true_negatives: F,
    false_positives: F,
    false_negatives: F,
}

impl<F: FType> ConfusionMatrix<F> {
    pub fn new() -> Self {
        Self {
            true_positives: F::zero(),
            true_negatives: F::zero(),
            false_positives: F::zero(),
            false_negatives: F::zero(),
        }
    }

    pub fn from_labels(y_true: &[Label], y_pred: &[Label]) -> Self {
        let mut cm = Self::new();
        for (truth, prediction) in y_true.iter().zip(y_pred.iter()) {
            cm.update(truth, prediction, None);
        }
        cm
    }

    pub fn update(&mut self, y_true: &Label, y_pred: &Label, sample_weight: Option<F>) {
        let weight = sample_weight.unwrap_or_else(F::one);
        match (y_true, y_pred) {
            (Label::Outlier, Label::Outlier) => self.true_positives += weight,
            (Label::Inlier, Label::Inlier) => self.true_negatives += weight,
            (Label::Inlier, Label::Outlier) => self.false_positives += weight,
            (Label::Outlier, Label::Inlier) => self.false_negatives += weight,
        }
    }

    pub fn true_positives(&self) -> F {
        self.true_positives
    }

    pub fn true_negatives(&self) -> F {
        self.true_negatives
    }

    pub fn false_positives(&self) -> F {
        self.false_positives
    }

    pub fn false_negatives(&self) -> F {
        self.false_negatives
    }

    pub fn total_weight(&self) -> F {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    pub fn accuracy(&self) -> F {
        ratio(self.true_positives + self.true_negatives, self.total_weight())
    }

    pub fn precision(&self) -> F {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    pub fn recall(&self) -> F {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    pub fn f1(&self) -> F {
        let two = F::one() + F::one();
        let precision = self.precision();
        let recall = self.recall();
        ratio(two * precision * recall, precision + recall)
    }
}

fn ratio<F: FType>(numerator: F, denominator: F) -> F {
    if denominator > F::zero() {
        numerator / denominator
    } else {
        F::zero()
    }
}

impl<F: FType> Default for ConfusionMatrix<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FType + fmt::Display> fmt::Debug for ConfusionMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10}{:<10}{:<10}", "", "Inlier", "Outlier")?;
        writeln!(
            f,
            "{:<10}{:<10.1}{:<10.1}",
            "Inlier", self.true_negatives, self.false_positives
        )?;
        writeln!(
            f,
            "{:<10}{:<10.1}{:<10.1}",
            "Outlier", self.false_negatives, self.true_positives
        )
    }
}
