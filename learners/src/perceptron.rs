use log::debug;
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    MlErr, Result,
    classifier::{Classifier, FitObserver, check_features, check_training_set},
};

const DEFAULT_MAX_ITER: usize = 1000;

/// The Perceptron: a mistake-driven linear separator for labels in `{-1, 1}`.
#[derive(Debug, Clone)]
pub struct Perceptron {
    include_intercept: bool,
    max_iter: usize,
    rng: Option<StdRng>,

    coefs: Option<Array1<f64>>,
    iterations: usize,
}

impl Default for Perceptron {
    fn default() -> Self {
        Self::new(true, DEFAULT_MAX_ITER)
    }
}

impl Perceptron {
    /// Returns a new `Perceptron`.
    ///
    /// # Arguments
    /// * `include_intercept` - Whether to fit an intercept term.
    /// * `max_iter` - The maximum amount of updates before giving up.
    pub fn new(include_intercept: bool, max_iter: usize) -> Self {
        Self {
            include_intercept,
            max_iter,
            rng: None,
            coefs: None,
            iterations: 0,
        }
    }

    /// Makes every iteration scan the samples in a freshly shuffled order drawn from `rng`,
    /// instead of index order.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// The fitted coefficients, intercept first when included.
    pub fn coefs(&self) -> Option<ArrayView1<'_, f64>> {
        self.coefs.as_ref().map(|c| c.view())
    }

    /// The amount of updates made by the last `fit`.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn score(&self, coefs: &Array1<f64>, x: ArrayView1<f64>) -> f64 {
        if self.include_intercept {
            coefs[0] + coefs.slice(ndarray::s![1..]).dot(&x)
        } else {
            coefs.dot(&x)
        }
    }

    fn n_features(&self, coefs: &Array1<f64>) -> usize {
        coefs.len() - usize::from(self.include_intercept)
    }

    /// Fits the separator, notifying `observer` after every update.
    ///
    /// Each iteration looks for a sample with `y_i * <w, x_i> <= 0`. If there is none the data
    /// is separated and fitting stops, otherwise `w += y_i * x_i`.
    ///
    /// # Arguments
    /// * `x` - The design matrix.
    /// * `y` - The labels, each one either `-1` or `1`.
    /// * `observer` - Gets called once per update with the updated model.
    pub fn fit_observed<O>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<i64>,
        observer: &mut O,
    ) -> Result<()>
    where
        O: FitObserver<Self>,
    {
        let n_features = check_training_set(x, y)?;
        if let Some((index, &value)) = y.iter().enumerate().find(|(_, l)| l.abs() != 1) {
            return Err(MlErr::InvalidLabel {
                index,
                value: value as f64,
            });
        }

        let dim = n_features + usize::from(self.include_intercept);
        self.coefs = Some(Array1::zeros(dim));
        self.iterations = 0;

        let mut order: Vec<usize> = (0..x.nrows()).collect();
        for _ in 0..self.max_iter {
            if let Some(rng) = self.rng.as_mut() {
                order.shuffle(rng);
            }

            let Some(coefs) = self.coefs.as_ref() else {
                return Err(MlErr::NotFitted("Perceptron"));
            };
            let mistake = order
                .iter()
                .copied()
                .find(|&i| y[i] as f64 * self.score(coefs, x.row(i)) <= 0.0);

            let Some(i) = mistake else {
                debug!("perceptron converged after {} updates", self.iterations);
                return Ok(());
            };

            let label = y[i] as f64;
            if let Some(coefs) = self.coefs.as_mut() {
                if self.include_intercept {
                    coefs[0] += label;
                    coefs
                        .slice_mut(ndarray::s![1..])
                        .scaled_add(label, &x.row(i));
                } else {
                    coefs.scaled_add(label, &x.row(i));
                }
            }
            self.iterations += 1;

            observer.on_iteration(self, x.row(i), y[i])?;
        }

        debug!(
            "perceptron stopped after reaching max_iter ({})",
            self.max_iter
        );
        Ok(())
    }
}

impl Classifier for Perceptron {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<()> {
        self.fit_observed(x, y, &mut ())
    }

    /// Predicts the sign of each sample's score: `1`, `-1`, or `0` exactly on the boundary.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<i64>> {
        let coefs = self.coefs.as_ref().ok_or(MlErr::NotFitted("Perceptron"))?;
        check_features(x, self.n_features(coefs))?;

        Ok(x.rows()
            .into_iter()
            .map(|row| {
                let s = self.score(coefs, row);
                if s > 0.0 {
                    1
                } else if s < 0.0 {
                    -1
                } else {
                    0
                }
            })
            .collect())
    }
}
