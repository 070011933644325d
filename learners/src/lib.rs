pub mod classifier;
pub mod dataset;
pub mod error;
pub mod lda;
pub mod linalg;
pub mod metrics;
pub mod naive_bayes;
pub mod perceptron;
mod test;

pub use classifier::{Classifier, FitObserver};
pub use dataset::{Dataset, DatasetSource};
pub use error::{MlErr, Result};
pub use lda::{Lda, LdaParams};
pub use metrics::{accuracy, misclassification_error};
pub use naive_bayes::{GaussianNaiveBayes, NaiveBayesParams};
pub use perceptron::Perceptron;
