use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{MlErr, Result, dataset::unique_labels, metrics::misclassification_error};

pub trait Classifier {
    /// Fits the classifier over the given samples.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per sample.
    /// * `y` - The labels of each row of `x`.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<()>;

    /// Predicts a label for each row of `x`.
    ///
    /// # Errors
    /// `NotFitted` if called before `fit`, `SizeMismatch` if the amount of features differs from
    /// the fitted one.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<i64>>;

    /// Returns the normalized misclassification error of the classifier over `x`.
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        misclassification_error(y, y_pred.view(), true)
    }
}

/// Gets notified by iterative learners once per completed fit iteration.
pub trait FitObserver<M> {
    /// # Arguments
    /// * `model` - The model in its current state.
    /// * `x` - The sample that triggered the iteration.
    /// * `y` - That sample's label.
    fn on_iteration(&mut self, model: &M, x: ArrayView1<f64>, y: i64) -> Result<()>;
}

impl<M> FitObserver<M> for () {
    fn on_iteration(&mut self, _model: &M, _x: ArrayView1<f64>, _y: i64) -> Result<()> {
        Ok(())
    }
}

impl<M, F> FitObserver<M> for F
where
    F: FnMut(&M, ArrayView1<f64>, i64) -> Result<()>,
{
    fn on_iteration(&mut self, model: &M, x: ArrayView1<f64>, y: i64) -> Result<()> {
        self(model, x, y)
    }
}

/// Validates the shapes of a training set and returns the amount of features.
pub(crate) fn check_training_set(x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<usize> {
    if x.nrows() != y.len() {
        return Err(MlErr::SizeMismatch {
            what: "labels",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    if x.is_empty() {
        return Err(MlErr::InvalidInput("cannot fit over an empty dataset"));
    }

    Ok(x.ncols())
}

/// Validates that `x` has the amount of features a model was fitted with.
pub(crate) fn check_features(x: ArrayView2<f64>, expected: usize) -> Result<()> {
    if x.ncols() != expected {
        return Err(MlErr::SizeMismatch {
            what: "features",
            got: x.ncols(),
            expected,
        });
    }

    Ok(())
}

/// Per-class statistics shared by the Gaussian generative models.
pub(crate) struct ClassStats {
    pub classes: Vec<i64>,
    pub counts: Vec<usize>,
    pub pi: Array1<f64>,
    pub mu: Array2<f64>,
}

impl ClassStats {
    /// Computes the sorted classes, their counts, priors and feature means.
    pub fn compute(x: ArrayView2<f64>, y: ArrayView1<i64>) -> Self {
        let classes = unique_labels(y);
        let n = y.len() as f64;

        let mut counts = vec![0; classes.len()];
        let mut mu = Array2::zeros((classes.len(), x.ncols()));
        for (row, label) in x.rows().into_iter().zip(&y) {
            let k = class_index(&classes, *label);
            counts[k] += 1;
            mu.row_mut(k).scaled_add(1.0, &row);
        }

        for (mut mean, &count) in mu.rows_mut().into_iter().zip(&counts) {
            mean /= count as f64;
        }

        let pi = counts.iter().map(|&c| c as f64 / n).collect();

        Self {
            classes,
            counts,
            pi,
            mu,
        }
    }
}

/// Index of `label` inside the sorted `classes`. Labels are always taken from `classes` itself.
pub(crate) fn class_index(classes: &[i64], label: i64) -> usize {
    classes.partition_point(|&c| c < label)
}

/// Maps each row of `scores` to the class with the largest score.
pub(crate) fn argmax_classes(classes: &[i64], scores: ArrayView2<f64>) -> Array1<i64> {
    scores
        .rows()
        .into_iter()
        .map(|row| {
            let best = row
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(k, _)| k)
                .unwrap_or(0);
            classes[best]
        })
        .collect()
}
