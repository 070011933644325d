//! Confidence-ellipse geometry of 2-D Gaussians.

use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::Deserialize;

/// Number of points sampled along every ellipse.
pub const ELLIPSE_POINTS: usize = 100;

/// How the eigenvalues of the covariance turn into semi-axis lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipseScale {
    /// The semi-axes are the eigenvalues themselves.
    #[default]
    Eigenvalue,
    /// The semi-axes are the square roots of the eigenvalues (one standard deviation).
    StdDev,
}

/// A closed curve of [`ELLIPSE_POINTS`] points. The first and last points coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCurve {
    points: Vec<(f64, f64)>,
}

impl EllipseCurve {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

/// Eigenvalues of the symmetric 2×2 matrix `cov`, ascending.
///
/// Only `cov[0][1]` is read off the diagonal.
pub fn symmetric_eigenvalues(cov: ArrayView2<f64>) -> [f64; 2] {
    let (a, b, d) = (cov[[0, 0]], cov[[0, 1]], cov[[1, 1]]);
    let mean = 0.5 * (a + d);
    let radius = (0.5 * (a - d)).hypot(b);
    [mean - radius, mean + radius]
}

/// Rotation of the major axis. `l1` is the largest eigenvalue of `cov`.
fn rotation(cov: ArrayView2<f64>, l1: f64) -> f64 {
    if cov[[0, 1]] != 0.0 {
        (l1 - cov[[0, 0]]).atan2(cov[[0, 1]])
    } else if cov[[0, 0]] < cov[[1, 1]] {
        PI / 2.0
    } else {
        0.0
    }
}

/// Samples the ellipse of the Gaussian `(mean, cov)` with the eigenvalues as semi-axes.
///
/// `cov` must be symmetric; otherwise the shape of the curve is unspecified.
pub fn ellipse(mean: ArrayView1<f64>, cov: ArrayView2<f64>) -> EllipseCurve {
    ellipse_scaled(mean, cov, EllipseScale::Eigenvalue)
}

/// Samples the ellipse of the Gaussian `(mean, cov)`.
///
/// # Arguments
/// * `mean` - The center, a 2-vector.
/// * `cov` - A symmetric 2×2 covariance.
/// * `scale` - How semi-axis lengths derive from the eigenvalues.
pub fn ellipse_scaled(
    mean: ArrayView1<f64>,
    cov: ArrayView2<f64>,
    scale: EllipseScale,
) -> EllipseCurve {
    let [low, high] = symmetric_eigenvalues(cov);
    let theta = rotation(cov, high);

    let (l1, l2) = match scale {
        EllipseScale::Eigenvalue => (high, low),
        EllipseScale::StdDev => (high.max(0.0).sqrt(), low.max(0.0).sqrt()),
    };

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (mx, my) = (mean[0], mean[1]);

    let points = Array1::linspace(0.0, 2.0 * PI, ELLIPSE_POINTS)
        .iter()
        .map(|t| {
            let (sin_t, cos_t) = t.sin_cos();
            let x = l1 * cos_theta * cos_t - l2 * sin_theta * sin_t;
            let y = l1 * sin_theta * cos_t + l2 * cos_theta * sin_t;
            (mx + x, my + y)
        })
        .collect();

    EllipseCurve { points }
}
