use std::cmp::Ordering;

use crate::common::{FType, Label};

/// Area under the ROC curve of anomaly scores against ground-truth
/// labels, with outliers as the positive class.
///
/// Computed as the Mann-Whitney rank statistic with tied scores assigned
/// their average rank. Returns `None` when the lengths differ or either
/// class is absent, since the curve is undefined there.
pub fn roc_auc<F: FType>(scores: &[F], y_true: &[Label]) -> Option<F> {
    if scores.is_empty() || scores.len() != y_true.len() {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    let n = order.len();
    let mut positive_rank_sum = 0.0f64;
    let mut num_positive = 0usize;

    // Walk runs of equal scores, giving each member the run's average
    // 1-based rank.
    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && scores[order[end + 1]] == scores[order[start]] {
            end += 1;
        }
        let average_rank = (start + 1 + end + 1) as f64 / 2.0;
        for &sample in &order[start..=end] {
            if y_true[sample] == Label::Outlier {
                positive_rank_sum += average_rank;
                num_positive += 1;
            }
        }
        start = end + 1;
    }

    let num_negative = n - num_positive;
    if num_positive == 0 || num_negative == 0 {
        return None;
    }

    let auc = (positive_rank_sum - (num_positive * (num_positive + 1)) as f64 / 2.0)
        / (num_positive * num_negative) as f64;
    F::from_f64(auc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_separation() {
        let scores = [0.2, 0.3, 0.4, 0.8, 0.9];
        let y_true = [
            Label::Inlier,
            Label::Inlier,
            Label::Inlier,
            Label::Outlier,
            Label::Outlier,
        ];
        assert_eq!(roc_auc::<f64>(&scores, &y_true), Some(1.0));
    }

    #[test]
    fn test_inverted_separation() {
        let scores = [0.9, 0.8, 0.2, 0.1];
        let y_true = [
            Label::Inlier,
            Label::Inlier,
            Label::Outlier,
            Label::Outlier,
        ];
        assert_eq!(roc_auc::<f64>(&scores, &y_true), Some(0.0));
    }

    #[test]
    fn test_all_tied_scores_give_half() {
        let scores = [0.5, 0.5, 0.5, 0.5];
        let y_true = [
            Label::Outlier,
            Label::Inlier,
            Label::Outlier,
            Label::Inlier,
        ];
        assert_eq!(roc_auc::<f64>(&scores, &y_true), Some(0.5));
    }

    #[test]
    fn test_partial_overlap() {
        // One inversion out of 2 * 2 pairs.
        let scores = [0.1, 0.6, 0.4, 0.9];
        let y_true = [
            Label::Inlier,
            Label::Inlier,
            Label::Outlier,
            Label::Outlier,
        ];
        assert_eq!(roc_auc::<f64>(&scores, &y_true), Some(0.75));
    }

    #[test]
    fn test_undefined_cases() {
        let all_inliers = [Label::Inlier, Label::Inlier];
        assert_eq!(roc_auc::<f64>(&[0.1, 0.2], &all_inliers), None);

        let mismatched = [Label::Inlier];
        assert_eq!(roc_auc::<f64>(&[0.1, 0.2], &mismatched), None);

        assert_eq!(roc_auc::<f64>(&[], &[]), None);
    }
}
