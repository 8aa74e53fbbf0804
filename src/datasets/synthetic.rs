use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::common::FType;

/// Seedable Gaussian point cloud, the classic toy source for outlier
/// detection demos: a tight cluster the model should call normal.
pub struct GaussianCloud;

impl GaussianCloud {
    /// `num_rows` points around `center` with isotropic standard
    /// deviation `std_dev` (must be positive).
    pub fn sample<F: FType>(num_rows: usize, center: &[f64], std_dev: f64, seed: u64) -> Array2<F> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let normal = Normal::new(0.0, std_dev).unwrap();
        let mut data = Array2::zeros((num_rows, center.len()));
        for mut row in data.rows_mut() {
            for (feature, value) in row.iter_mut().enumerate() {
                *value = F::from_f64(center[feature] + normal.sample(&mut rng)).unwrap();
            }
        }
        data
    }
}

/// Seedable uniform box, handy for planting points far outside a
/// cluster's support.
pub struct UniformBox;

impl UniformBox {
    pub fn sample<F: FType>(
        num_rows: usize,
        num_features: usize,
        low: f64,
        high: f64,
        seed: u64,
    ) -> Array2<F> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut data = Array2::zeros((num_rows, num_features));
        for value in data.iter_mut() {
            *value = F::from_f64(rng.gen_range(low..high)).unwrap();
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_shape_and_determinism() {
        let a: Array2<f64> = GaussianCloud::sample(50, &[1.0, -1.0, 0.0], 0.5, 99);
        let b: Array2<f64> = GaussianCloud::sample(50, &[1.0, -1.0, 0.0], 0.5, 99);

        assert_eq!(a.nrows(), 50);
        assert_eq!(a.ncols(), 3);
        assert_eq!(a, b);

        let c: Array2<f64> = GaussianCloud::sample(50, &[1.0, -1.0, 0.0], 0.5, 100);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cloud_centers_on_its_center() {
        let data: Array2<f64> = GaussianCloud::sample(2000, &[3.0, -2.0], 0.5, 7);
        let mean_x = data.column(0).sum() / 2000.0;
        let mean_y = data.column(1).sum() / 2000.0;

        assert!((mean_x - 3.0).abs() < 0.1);
        assert!((mean_y + 2.0).abs() < 0.1);
    }

    #[test]
    fn test_uniform_box_stays_in_bounds() {
        let data: Array2<f64> = UniformBox::sample(200, 2, 20.0, 50.0, 3);

        assert_eq!(data.nrows(), 200);
        assert!(data.iter().all(|&v| (20.0..50.0).contains(&v)));
    }
}
