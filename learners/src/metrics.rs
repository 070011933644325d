use ndarray::ArrayView1;

use crate::{MlErr, Result};

fn check_lengths(y_true: ArrayView1<i64>, y_pred: ArrayView1<i64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::InvalidInput("cannot score an empty prediction"));
    }

    Ok(())
}

fn mismatches(y_true: ArrayView1<i64>, y_pred: ArrayView1<i64>) -> usize {
    y_true.iter().zip(&y_pred).filter(|(t, p)| t != p).count()
}

/// Computes the misclassification error of a prediction.
///
/// # Arguments
/// * `y_true` - The true labels.
/// * `y_pred` - The predicted labels.
/// * `normalize` - Whether to return the fraction of mistakes instead of their amount.
pub fn misclassification_error(
    y_true: ArrayView1<i64>,
    y_pred: ArrayView1<i64>,
    normalize: bool,
) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let errors = mismatches(y_true, y_pred) as f64;
    if normalize {
        Ok(errors / y_true.len() as f64)
    } else {
        Ok(errors)
    }
}

/// Computes the fraction of predictions equal to the true labels, a value in `[0, 1]`.
pub fn accuracy(y_true: ArrayView1<i64>, y_pred: ArrayView1<i64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let hits = y_true.len() - mismatches(y_true, y_pred);
    Ok(hits as f64 / y_true.len() as f64)
}
