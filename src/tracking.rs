use learners::{Classifier, FitObserver, Perceptron};
use ndarray::{ArrayView1, ArrayView2};

/// The losses of a training run, one per completed iteration, in order.
///
/// Append-only: values can be pushed and read, never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossTrace {
    values: Vec<f64>,
}

impl LossTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loss: f64) {
        self.values.push(loss);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl From<Vec<f64>> for LossTrace {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Records the loss of a classifier over a fixed training set every time it gets notified.
pub struct LossTracker<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, i64>,
    trace: LossTrace,
}

impl<'a> LossTracker<'a> {
    /// Returns a new `LossTracker` with an empty trace.
    ///
    /// # Arguments
    /// * `x` - The whole training design matrix.
    /// * `y` - The whole training label vector.
    pub fn new(x: ArrayView2<'a, f64>, y: ArrayView1<'a, i64>) -> Self {
        Self {
            x,
            y,
            trace: LossTrace::new(),
        }
    }

    /// Computes the loss of `model` over the entire training set and appends it.
    pub fn record<C: Classifier>(&mut self, model: &C) -> learners::Result<f64> {
        let loss = model.loss(self.x, self.y)?;
        self.trace.push(loss);
        Ok(loss)
    }

    pub fn losses(&self) -> &LossTrace {
        &self.trace
    }

    pub fn into_trace(self) -> LossTrace {
        self.trace
    }
}

impl FitObserver<Perceptron> for LossTracker<'_> {
    /// The sample that triggered the update is ignored, the loss always covers the full set.
    fn on_iteration(
        &mut self,
        model: &Perceptron,
        _x: ArrayView1<f64>,
        _y: i64,
    ) -> learners::Result<()> {
        self.record(model).map(|_| ())
    }
}
