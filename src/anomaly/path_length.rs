use crate::common::FType;

/// Euler-Mascheroni constant, used in the harmonic-number approximation.
pub const EULER_GAMMA: f64 = 0.5772156649;

// H(i) ~= ln(i) + gamma for i >= 1, H(0) = 0.
fn harmonic(i: usize) -> f64 {
    if i == 0 {
        0.0
    } else {
        (i as f64).ln() + EULER_GAMMA
    }
}

/// Expected path length `c(n)` of an unsuccessful search in a random
/// binary search tree over `n` points.
///
/// Serves two roles: the correction added at leaves whose construction
/// stopped early, and the normalization denominator of every anomaly
/// score. `c(n) = 0` for `n <= 1`, otherwise
/// `c(n) = 2 * H(n - 1) - 2 * (n - 1) / n`.
pub fn expected_path_length<F: FType>(n: usize) -> F {
    if n <= 1 {
        return F::zero();
    }
    let nf = n as f64;
    F::from_f64(2.0 * harmonic(n - 1) - 2.0 * (nf - 1.0) / nf).unwrap()
}

/// Default tree-height cutoff for a sub-sample of `sub_sample_size`
/// points: `ceil(log2(sub_sample_size))`. Anomalies isolate well above
/// this depth, so building the deeper "normal" branches is wasted work.
pub fn default_max_depth(sub_sample_size: usize) -> usize {
    (sub_sample_size as f64).log2().ceil() as usize
}
