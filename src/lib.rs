//! Visual evaluation of linear classifiers: perceptron training curves and side by side
//! comparisons of the Gaussians fitted by Gaussian Naive Bayes and LDA.

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod plots;
pub mod tracking;

pub use config::{RunConfig, TrainingRun};
pub use driver::{run, ComparisonOutcome, RunSummary, TrainingOutcome};
pub use error::{PlotErr, Result};
pub use geometry::{ellipse, ellipse_scaled, EllipseCurve, EllipseScale};
pub use tracking::{LossTrace, LossTracker};
