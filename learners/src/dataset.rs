use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use ndarray_npy::read_npy;

use crate::{MlErr, Result};

/// A labeled dataset: a design matrix `x` and its index-aligned integer labels `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<i64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per sample.
    /// * `y` - The labels, one per row of `x`.
    ///
    /// # Errors
    /// `SizeMismatch` if the amount of rows and labels differ, `InvalidInput` if empty.
    pub fn new(x: Array2<f64>, y: Array1<i64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if x.is_empty() {
            return Err(MlErr::InvalidInput("dataset must be non-empty"));
        }

        Ok(Self { x, y })
    }

    /// Splits a flat `(n, d + 1)` array into features and labels. The last column holds the
    /// labels, stored as reals with integral values.
    ///
    /// # Arguments
    /// * `data` - The flat array.
    ///
    /// # Returns
    /// A new dataset or an error if the label column is missing or holds a non integral value.
    pub fn from_rows(data: ArrayView2<f64>) -> Result<Self> {
        let ncols = data.ncols();
        if ncols < 2 {
            return Err(MlErr::SizeMismatch {
                what: "dataset columns",
                got: ncols,
                expected: 2,
            });
        }

        let x = data.slice(s![.., ..ncols - 1]).to_owned();
        let y = data
            .column(ncols - 1)
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value.is_finite() && value.fract() == 0.0 {
                    Ok(value as i64)
                } else {
                    Err(MlErr::InvalidLabel { index, value })
                }
            })
            .collect::<Result<Array1<_>>>()?;

        Self::new(x, y)
    }

    /// Loads a dataset stored as a 2-D `f64` `.npy` array, see [`Dataset::from_rows`].
    pub fn load_npy<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data: Array2<f64> = read_npy(path)?;
        Self::from_rows(data.view())
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, i64> {
        self.y.view()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.len_of(Axis(1))
    }

    /// Returns the distinct labels in ascending order.
    pub fn classes(&self) -> Vec<i64> {
        unique_labels(self.y.view())
    }
}

/// Sorted distinct values of `y`.
pub fn unique_labels(y: ArrayView1<i64>) -> Vec<i64> {
    let mut classes = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}

/// Resolves dataset names against a directory of `.npy` files.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    dir: PathBuf,
}

impl DatasetSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Loads the dataset called `name`.
    pub fn load(&self, name: &str) -> Result<Dataset> {
        let path = self.path(name);
        log::debug!("loading dataset from {}", path.display());
        Dataset::load_npy(path)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use ndarray_npy::write_npy;

    use super::*;

    #[test]
    fn splits_last_column_into_labels() {
        let data = array![[0.5, 1.0, 2.0], [1.5, -1.0, 0.0], [2.5, 3.0, 2.0]];
        let ds = Dataset::from_rows(data.view()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.x(), array![[0.5, 1.0], [1.5, -1.0], [2.5, 3.0]]);
        assert_eq!(ds.y(), array![2, 0, 2]);
        assert_eq!(ds.classes(), vec![0, 2]);
    }

    #[test]
    fn rejects_fractional_labels() {
        let data = array![[0.0, 0.0, 1.0], [1.0, 1.0, 0.5]];
        let err = Dataset::from_rows(data.view()).unwrap_err();
        assert!(matches!(err, MlErr::InvalidLabel { index: 1, .. }));
    }

    #[test]
    fn rejects_misaligned_labels() {
        let err = Dataset::new(array![[0.0, 1.0]], array![1, 2]).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 2,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn source_loads_npy_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = array![[1.0, 2.0, -1.0], [3.0, 4.0, 1.0]];
        write_npy(dir.path().join("tiny.npy"), &data).unwrap();

        let source = DatasetSource::new(dir.path());
        let ds = source.load("tiny.npy").unwrap();
        assert_eq!(ds.y(), array![-1, 1]);
        assert_eq!(ds.x().row(1), array![3.0, 4.0]);
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::new(dir.path());
        assert!(matches!(source.load("nope.npy"), Err(MlErr::Npy(_))));
    }
}
