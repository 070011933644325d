use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray_npy::ReadNpyError;

/// The result type used in the entire learners crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The learners crate's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidInput(&'static str),
    InvalidLabel {
        index: usize,
        value: f64,
    },
    NotFitted(&'static str),
    TooFewSamples {
        what: &'static str,
        got: usize,
        needed: usize,
    },
    SingularMatrix,
    Npy(ReadNpyError),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlErr::InvalidLabel { index, value } => {
                write!(f, "invalid label {value} at sample {index}")
            }
            MlErr::NotFitted(model) => {
                write!(f, "{model} must be fitted before calling this method")
            }
            MlErr::TooFewSamples { what, got, needed } => write!(
                f,
                "not enough samples for {what}, got {got} and needed at least {needed}"
            ),
            MlErr::SingularMatrix => write!(f, "the matrix is singular and cannot be inverted"),
            MlErr::Npy(e) => write!(f, "failed to read npy array: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Npy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadNpyError> for MlErr {
    fn from(value: ReadNpyError) -> Self {
        Self::Npy(value)
    }
}
