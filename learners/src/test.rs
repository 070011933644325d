#![cfg(test)]

use ndarray::{Array1, Array2, ArrayView1, array};

use crate::{Classifier, GaussianNaiveBayes, Lda, Perceptron, Result, accuracy};

/// Three tight clusters, two points each, centered at (0, 0), (5, 5) and (10, 0).
fn three_clusters() -> (Array2<f64>, Array1<i64>) {
    let x = array![
        [-0.1, 0.0],
        [0.1, 0.0],
        [5.0, 4.9],
        [5.0, 5.1],
        [9.9, -0.1],
        [10.1, 0.1],
    ];
    (x, array![0, 0, 1, 1, 2, 2])
}

#[test]
fn gaussian_models_separate_three_clusters() {
    let (x, y) = three_clusters();
    let centers = array![[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]];

    let mut lda = Lda::new();
    lda.fit(x.view(), y.view()).unwrap();
    let mut nb = GaussianNaiveBayes::default();
    nb.fit(x.view(), y.view()).unwrap();

    let lda_acc = accuracy(y.view(), lda.predict(x.view()).unwrap().view()).unwrap();
    let nb_acc = accuracy(y.view(), nb.predict(x.view()).unwrap().view()).unwrap();
    assert_eq!(lda_acc, 1.0);
    assert_eq!(nb_acc, 1.0);

    for mu in [&lda.params().unwrap().mu, &nb.params().unwrap().mu] {
        for (fitted, center) in mu.iter().zip(centers.iter()) {
            assert!((fitted - center).abs() < 1e-9);
        }
    }
}

#[test]
fn perceptron_and_gaussians_agree_on_separable_data() {
    let x = array![
        [1.0, 2.0],
        [2.0, 1.5],
        [1.5, 2.5],
        [-1.0, -2.0],
        [-2.0, -1.0],
        [-1.5, -0.5],
    ];
    let signs = array![1, 1, 1, -1, -1, -1];

    let mut perceptron = Perceptron::default();
    perceptron.fit(x.view(), signs.view()).unwrap();
    assert_eq!(perceptron.loss(x.view(), signs.view()).unwrap(), 0.0);

    let mut lda = Lda::new();
    lda.fit(x.view(), signs.view()).unwrap();
    assert_eq!(lda.predict(x.view()).unwrap(), perceptron.predict(x.view()).unwrap());
}

fn as_observer<F>(f: F) -> F
where
    F: FnMut(&Perceptron, ArrayView1<f64>, i64) -> Result<()>,
{
    f
}

#[test]
fn losses_through_closure_observer_match_invocations() {
    let x = array![[3.0, 1.0], [1.0, 3.0], [-2.0, -1.0], [-1.0, -3.0]];
    let y = array![1, 1, -1, -1];

    let mut losses: Vec<f64> = Vec::new();
    let mut perceptron = Perceptron::default();
    {
        let mut observer = as_observer(|model, _, _| {
            losses.push(model.loss(x.view(), y.view())?);
            Ok(())
        });
        perceptron
            .fit_observed(x.view(), y.view(), &mut observer)
            .unwrap();
    }

    assert_eq!(losses.len(), perceptron.iterations());
    assert_eq!(losses.last().copied(), Some(0.0));
}
