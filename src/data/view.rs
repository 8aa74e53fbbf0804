use ndarray::{ArrayView1, ArrayView2};

use crate::common::{Error, FType};

/// Read-only, validated accessor over a caller-owned feature matrix
/// (rows are samples, columns are features).
///
/// Validation happens once at construction: the matrix must have at least
/// one row and one column and every value must be finite. Model code can
/// then index freely without re-checking.
pub struct DatasetView<'a, F: FType> {
    matrix: ArrayView2<'a, F>,
}

impl<'a, F: FType> DatasetView<'a, F> {
    pub fn new(matrix: ArrayView2<'a, F>) -> Result<Self, Error> {
        if matrix.nrows() == 0 || matrix.ncols() == 0 {
            return Err(Error::InvalidInput("empty feature matrix".to_string()));
        }
        for ((row, col), value) in matrix.indexed_iter() {
            if !value.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "non-finite value at row {row}, column {col}"
                )));
            }
        }
        Ok(Self { matrix })
    }

    pub fn num_rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, F> {
        self.matrix.row(index)
    }

    pub fn value(&self, row: usize, feature: usize) -> F {
        self.matrix[(row, feature)]
    }

    /// Minimum and maximum of one feature over the given row indices.
    /// `rows` must be non-empty.
    pub fn feature_range(&self, rows: &[usize], feature: usize) -> (F, F) {
        let mut min = self.value(rows[0], feature);
        let mut max = min;
        for &row in &rows[1..] {
            let value = self.value(row, feature);
            if value < min {
                min = value;
            } else if value > max {
                max = value;
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_rejects_empty_matrix() {
        let x: Array2<f64> = Array2::zeros((0, 3));
        assert!(matches!(
            DatasetView::new(x.view()),
            Err(Error::InvalidInput(_))
        ));

        let x: Array2<f64> = Array2::zeros((3, 0));
        assert!(matches!(
            DatasetView::new(x.view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let x = array![[0.0, 1.0], [f64::NAN, 2.0]];
        assert!(matches!(
            DatasetView::new(x.view()),
            Err(Error::InvalidInput(_))
        ));

        let x = array![[0.0, f64::INFINITY]];
        assert!(matches!(
            DatasetView::new(x.view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_feature_range_over_index_subset() {
        let x = array![[0.0, 5.0], [2.0, -1.0], [9.0, 3.0], [4.0, 7.0]];
        let view = DatasetView::new(x.view()).unwrap();

        assert_eq!(view.feature_range(&[0, 1, 2, 3], 0), (0.0, 9.0));
        assert_eq!(view.feature_range(&[1, 3], 1), (-1.0, 7.0));
        assert_eq!(view.feature_range(&[2], 0), (9.0, 9.0));
    }

    #[test]
    fn test_accessors() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let view = DatasetView::new(x.view()).unwrap();

        assert_eq!(view.num_rows(), 2);
        assert_eq!(view.num_features(), 3);
        assert_eq!(view.value(1, 2), 6.0);
        assert_eq!(view.row(0).to_vec(), vec![1.0, 2.0, 3.0]);
    }
}
