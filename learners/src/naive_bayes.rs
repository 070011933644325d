use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{
    MlErr, Result,
    classifier::{
        ClassStats, Classifier, argmax_classes, check_features, check_training_set, class_index,
    },
};

const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

/// The parameters of a fitted `GaussianNaiveBayes`.
#[derive(Debug, Clone)]
pub struct NaiveBayesParams {
    /// The distinct labels, ascending.
    pub classes: Vec<i64>,
    /// The class priors, one per class.
    pub pi: Array1<f64>,
    /// The class means, one row per class.
    pub mu: Array2<f64>,
    /// The feature variances, one row per class.
    pub vars: Array2<f64>,
}

/// A Gaussian generative classifier assuming the features are independent given the class.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    var_smoothing: f64,
    params: Option<NaiveBayesParams>,
}

impl Default for GaussianNaiveBayes {
    fn default() -> Self {
        Self::new(DEFAULT_VAR_SMOOTHING)
    }
}

impl GaussianNaiveBayes {
    /// Returns a new `GaussianNaiveBayes`.
    ///
    /// # Arguments
    /// * `var_smoothing` - The fraction of the largest feature variance of the training set that
    ///   gets added to every class variance.
    pub fn new(var_smoothing: f64) -> Self {
        Self {
            var_smoothing,
            params: None,
        }
    }

    /// The fitted parameters.
    ///
    /// # Errors
    /// `NotFitted` if called before `fit`.
    pub fn params(&self) -> Result<&NaiveBayesParams> {
        self.params
            .as_ref()
            .ok_or(MlErr::NotFitted("GaussianNaiveBayes"))
    }

    /// Computes the log of the joint density of each sample and each class.
    ///
    /// # Returns
    /// An `n_samples × n_classes` matrix.
    pub fn log_likelihood(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let params = self.params()?;
        check_features(x, params.mu.ncols())?;

        let mut out = Array2::zeros((x.nrows(), params.classes.len()));
        let classes = params.mu.rows().into_iter().zip(params.vars.rows()).zip(&params.pi);

        for (k, ((mean, vars), prior)) in classes.enumerate() {
            let norm: f64 = vars.iter().map(|v| (2.0 * PI * v).ln()).sum();
            for (i, sample) in x.rows().into_iter().enumerate() {
                let quad: f64 = sample
                    .iter()
                    .zip(&mean)
                    .zip(&vars)
                    .map(|((s, m), v)| (s - m).powi(2) / v)
                    .sum();
                out[[i, k]] = prior.ln() - 0.5 * (norm + quad);
            }
        }

        Ok(out)
    }
}

impl Classifier for GaussianNaiveBayes {
    /// Fits the class priors, means, and the unbiased per-class feature variances.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<()> {
        check_training_set(x, y)?;
        let ClassStats {
            classes,
            counts,
            pi,
            mu,
        } = ClassStats::compute(x, y);

        if let Some(&count) = counts.iter().find(|&&c| c < 2) {
            return Err(MlErr::TooFewSamples {
                what: "a class variance",
                got: count,
                needed: 2,
            });
        }

        let mut vars = Array2::<f64>::zeros(mu.dim());
        for (row, label) in x.rows().into_iter().zip(&y) {
            let k = class_index(&classes, *label);
            let diff = &row - &mu.row(k);
            vars.row_mut(k).scaled_add(1.0, &diff.mapv(|d| d * d));
        }
        for (mut var, &count) in vars.rows_mut().into_iter().zip(&counts) {
            var /= (count - 1) as f64;
        }

        let epsilon = self.var_smoothing
            * x.var_axis(Axis(0), 0.0)
                .iter()
                .fold(0.0_f64, |m, &v| m.max(v));
        vars += epsilon;

        if vars.iter().any(|&v| v <= 0.0) {
            return Err(MlErr::InvalidInput(
                "a feature has zero variance within a class",
            ));
        }

        self.params = Some(NaiveBayesParams {
            classes,
            pi,
            mu,
            vars,
        });

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<i64>> {
        let scores = self.log_likelihood(x)?;
        Ok(argmax_classes(&self.params()?.classes, scores.view()))
    }
}
