use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{
    MlErr, Result,
    classifier::{
        ClassStats, Classifier, argmax_classes, check_features, check_training_set, class_index,
    },
    linalg,
};

/// The parameters of a fitted `Lda`.
#[derive(Debug, Clone)]
pub struct LdaParams {
    /// The distinct labels, ascending.
    pub classes: Vec<i64>,
    /// The class priors, one per class.
    pub pi: Array1<f64>,
    /// The class means, one row per class.
    pub mu: Array2<f64>,
    /// The covariance shared by every class.
    pub cov: Array2<f64>,
    cov_inv: Array2<f64>,
    log_det: f64,
}

/// Linear discriminant analysis: a Gaussian generative classifier whose classes share one
/// covariance matrix.
#[derive(Debug, Clone, Default)]
pub struct Lda {
    params: Option<LdaParams>,
}

impl Lda {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted parameters.
    ///
    /// # Errors
    /// `NotFitted` if called before `fit`.
    pub fn params(&self) -> Result<&LdaParams> {
        self.params.as_ref().ok_or(MlErr::NotFitted("LDA"))
    }

    /// Computes the log of the joint density of each sample and each class, that is, the
    /// Gaussian log density plus the log prior.
    ///
    /// # Returns
    /// An `n_samples × n_classes` matrix.
    pub fn log_likelihood(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let params = self.params()?;
        check_features(x, params.cov.nrows())?;

        let d = x.ncols() as f64;
        let norm = -0.5 * (d * (2.0 * PI).ln() + params.log_det);
        let mut out = Array2::zeros((x.nrows(), params.classes.len()));

        for (k, (mean, prior)) in params.mu.rows().into_iter().zip(&params.pi).enumerate() {
            for (i, sample) in x.rows().into_iter().enumerate() {
                let diff = &sample - &mean;
                let mahalanobis = diff.dot(&params.cov_inv.dot(&diff));
                out[[i, k]] = prior.ln() + norm - 0.5 * mahalanobis;
            }
        }

        Ok(out)
    }
}

impl Classifier for Lda {
    /// Fits the class priors and means, and the pooled unbiased covariance estimator
    /// `sum (x_i - mu_{y_i})(x_i - mu_{y_i})^T / (n - K)`.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<i64>) -> Result<()> {
        check_training_set(x, y)?;
        let ClassStats {
            classes, pi, mu, ..
        } = ClassStats::compute(x, y);

        let (n, k) = (x.nrows(), classes.len());
        if n <= k {
            return Err(MlErr::TooFewSamples {
                what: "the pooled covariance",
                got: n,
                needed: k + 1,
            });
        }

        let mut centered = x.to_owned();
        for (mut row, label) in centered.axis_iter_mut(Axis(0)).zip(&y) {
            row -= &mu.row(class_index(&classes, *label));
        }
        let cov = centered.t().dot(&centered) / (n - k) as f64;

        let cov_inv = linalg::invert(cov.view())?;
        let det = linalg::determinant(cov.view())?;
        if det <= 0.0 {
            return Err(MlErr::SingularMatrix);
        }

        self.params = Some(LdaParams {
            classes,
            pi,
            mu,
            cov,
            cov_inv,
            log_det: det.ln(),
        });

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<i64>> {
        let scores = self.log_likelihood(x)?;
        Ok(argmax_classes(&self.params()?.classes, scores.view()))
    }
}
