//! Copies between `ndarray` and `nalgebra` dense matrices.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Copies an `ndarray` view into a column-major [`DMatrix`].
pub fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    DMatrix::from_fn(rows, cols, |i, j| a[[i, j]])
}

/// Copies a [`DMatrix`] back into a row-major [`Array2`].
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn copies_preserve_layout() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let m = to_dmatrix(a.view());
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(to_array2(&m), a);
    }

    #[test]
    fn transposed_view_is_copied_logically() {
        let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let m = to_dmatrix(a.t());
        assert_eq!(m.nrows(), 2);
        assert_eq!(m[(0, 2)], 5.0);
        assert_eq!(m[(1, 0)], 2.0);
    }

    #[test]
    fn empty_matrix() {
        let a = Array2::<f64>::zeros((0, 0));
        let m = to_dmatrix(a.view());
        assert_eq!(m.nrows(), 0);
        assert_eq!(to_array2(&m).dim(), (0, 0));
    }
}
