//! Dense routines for the small square matrices the Gaussian models work with.

use ndarray::{Array2, ArrayView2};

use crate::{MlErr, Result};

const PIVOT_EPS: f64 = 1e-12;

fn check_square(a: ArrayView2<f64>) -> Result<usize> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(MlErr::SizeMismatch {
            what: "square matrix columns",
            got: cols,
            expected: rows,
        });
    }

    Ok(rows)
}

/// Inverts `a` with Gauss-Jordan elimination and partial pivoting.
///
/// # Errors
/// `SingularMatrix` if a pivot vanishes, `SizeMismatch` if `a` is not square.
pub fn invert(a: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = check_square(a)?;
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);

    let mut m = a.to_owned();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| m[[i, col]].abs().total_cmp(&m[[j, col]].abs()))
            .unwrap_or(col);

        if m[[pivot, col]].abs() <= PIVOT_EPS * scale {
            return Err(MlErr::SingularMatrix);
        }

        if pivot != col {
            for k in 0..n {
                m.swap([pivot, k], [col, k]);
                inv.swap([pivot, k], [col, k]);
            }
        }

        let p = m[[col, col]];
        m.row_mut(col).mapv_inplace(|v| v / p);
        inv.row_mut(col).mapv_inplace(|v| v / p);

        for row in 0..n {
            if row == col {
                continue;
            }

            let factor = m[[row, col]];
            if factor == 0.0 {
                continue;
            }

            let m_col = m.row(col).to_owned();
            let inv_col = inv.row(col).to_owned();
            m.row_mut(row).scaled_add(-factor, &m_col);
            inv.row_mut(row).scaled_add(-factor, &inv_col);
        }
    }

    Ok(inv)
}

/// Determinant of `a` via LU elimination with partial pivoting.
pub fn determinant(a: ArrayView2<f64>) -> Result<f64> {
    let n = check_square(a)?;
    let mut m = a.to_owned();
    let mut det = 1.0;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| m[[i, col]].abs().total_cmp(&m[[j, col]].abs()))
            .unwrap_or(col);

        if m[[pivot, col]] == 0.0 {
            return Ok(0.0);
        }

        if pivot != col {
            for k in 0..n {
                m.swap([pivot, k], [col, k]);
            }
            det = -det;
        }

        let p = m[[col, col]];
        det *= p;

        for row in col + 1..n {
            let factor = m[[row, col]] / p;
            let pivot_row = m.row(col).to_owned();
            m.row_mut(row).scaled_add(-factor, &pivot_row);
        }
    }

    Ok(det)
}
