use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use ndarray::{Array1, ArrayView2};
use num::{Float, FromPrimitive};
use thiserror::Error;

/// Float alias trait shared by every model, metric and data helper.
///
/// `Send + Sync` is part of the bound because fitting and scoring fan out
/// across worker threads.
pub trait FType:
    Float
    + FromPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + std::fmt::Debug
{
}
impl<T> FType for T where
    T: Float
        + FromPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + std::fmt::Debug
{
}

/// Errors reported by fallible operations.
///
/// All of them surface synchronously at the offending call; nothing is
/// retried internally and no partial results are returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The input matrix is unusable: empty, ragged, or containing
    /// non-finite values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Scoring or predicting was attempted before `fit`.
    #[error("model has not been fitted")]
    NotFitted,

    /// The scored matrix has a different feature count than the one the
    /// model was trained on.
    #[error("dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A configuration value is outside its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Binary verdict for one sample.
///
/// Converts to the conventional `+1` (inlier) / `-1` (outlier) integers:
///
/// ```
/// use lonetree::common::Label;
///
/// assert_eq!(Label::Inlier.as_i8(), 1);
/// assert_eq!(Label::Outlier.as_i8(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Inlier,
    Outlier,
}

impl Label {
    pub fn as_i8(self) -> i8 {
        match self {
            Label::Inlier => 1,
            Label::Outlier => -1,
        }
    }

    pub fn is_outlier(self) -> bool {
        self == Label::Outlier
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> i8 {
        label.as_i8()
    }
}

/// Normalized anomaly score in `(0, 1]` paired with its thresholded label.
/// Produced fresh on every scoring call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult<F: FType> {
    pub score: F,
    pub label: Label,
}

/// Trait for batch anomaly detector models.
///
/// Implement this trait for your detector to use the `fit`,
/// `anomaly_scores` and `predict` methods behind a common seam.
pub trait AnomalyDetector<F: FType> {
    fn fit(&mut self, x: &ArrayView2<'_, F>) -> Result<(), Error>;
    fn anomaly_scores(&self, x: &ArrayView2<'_, F>) -> Result<Array1<F>, Error>;
    fn predict(&self, x: &ArrayView2<'_, F>) -> Result<Vec<Label>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_signs() {
        assert_eq!(Label::Inlier.as_i8(), 1);
        assert_eq!(Label::Outlier.as_i8(), -1);
        assert_eq!(i8::from(Label::Outlier), -1);
        assert!(Label::Outlier.is_outlier());
        assert!(!Label::Inlier.is_outlier());
    }
}
