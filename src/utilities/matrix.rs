use crate::constants::PIVOT_TOLERANCE;
use ndarray::{s, Array1, Array2};

// Gauss-Jordan inversion with partial pivoting, sized for the
// groups x groups covariance matrices this crate produces. Returns None
// when a pivot collapses below tolerance (singular matrix).
pub fn invert(matrix: &Array2<f64>) -> Option<Array2<f64>> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());
    if n == 0 {
        return Some(Array2::zeros((0, 0)));
    }
    if n == 1 {
        // two-group case: scalar reciprocal
        let v = matrix[[0, 0]];
        if v.abs() < PIVOT_TOLERANCE {
            return None;
        }
        return Some(Array2::from_elem((1, 1), 1.0 / v));
    }
    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(matrix);
    for i in 0..n {
        aug[[i, n + i]] = 1.0;
    }
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if aug[[pivot, col]].abs() < PIVOT_TOLERANCE {
            return None;
        }
        if pivot != col {
            for c in 0..2 * n {
                aug.swap([col, c], [pivot, c]);
            }
        }
        let pivot_value = aug[[col, col]];
        for c in 0..2 * n {
            aug[[col, c]] /= pivot_value;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for c in 0..2 * n {
                aug[[row, c]] -= factor * aug[[col, c]];
            }
        }
    }
    Some(aug.slice(s![.., n..]).to_owned())
}

// v . M . v^T as a scalar
pub fn quadratic_form(v: &Array1<f64>, m: &Array2<f64>) -> f64 {
    v.dot(&m.dot(v))
}
