use std::path::Path;

use learners::{accuracy, Classifier, Dataset, GaussianNaiveBayes, Lda};
use log::info;
use ndarray::{Array1, Array2, ArrayView2};

use super::figure::{Figure, Layer, Marker, Paint, Panel};
use crate::{
    error::{PlotErr, Result},
    geometry::{ellipse_scaled, EllipseScale},
};

pub const NAIVE_BAYES_NAME: &str = "Gaussian Naive Bayes";
pub const LDA_NAME: &str = "LDA";

/// What a fitted model did on the dataset it was fitted on.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub name: &'static str,
    pub accuracy: f64,
    /// The fitted class means, one row per class.
    pub means: Array2<f64>,
    pub predictions: Array1<i64>,
}

/// The result of comparing both Gaussian classifiers on one dataset.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub figure: Figure,
    pub naive_bayes: ModelReport,
    pub lda: ModelReport,
    pub file_name: String,
}

/// The dataset name without directories nor extension.
pub fn dataset_stem(dataset_name: &str) -> &str {
    Path::new(dataset_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(dataset_name)
}

/// The artifact name of the comparison of `dataset_name`.
pub fn comparison_file_name(dataset_name: &str) -> String {
    format!(
        "lda_and_gaussian_naive_bayes_comparison.{}.svg",
        dataset_stem(dataset_name)
    )
}

/// Fits Gaussian Naive Bayes and LDA over the whole dataset and lays out their fitted Gaussians
/// side by side: naive Bayes on the left, LDA on the right.
///
/// Both panels scatter the samples colored by their true label, mark the fitted means with
/// crosses and draw one ellipse per fitted class.
///
/// # Arguments
/// * `dataset_name` - Used for the title and the artifact name.
/// * `dataset` - A dataset with exactly 2 features.
/// * `scale` - How ellipse semi-axes derive from the covariance eigenvalues.
pub fn compare(dataset_name: &str, dataset: &Dataset, scale: EllipseScale) -> Result<Comparison> {
    if dataset.n_features() != 2 {
        return Err(PlotErr::Geometry(
            "comparing Gaussian classifiers needs exactly 2 features",
        ));
    }

    let (x, y) = (dataset.x(), dataset.y());

    let mut naive_bayes = GaussianNaiveBayes::default();
    naive_bayes.fit(x, y)?;
    let mut lda = Lda::new();
    lda.fit(x, y)?;

    let nb_pred = naive_bayes.predict(x)?;
    let lda_pred = lda.predict(x)?;
    let nb_acc = accuracy(y, nb_pred.view())?;
    let lda_acc = accuracy(y, lda_pred.view())?;
    info!("{dataset_name}: {NAIVE_BAYES_NAME} accuracy {nb_acc:.3}, {LDA_NAME} accuracy {lda_acc:.3}");

    let nb_params = naive_bayes.params()?;
    let lda_params = lda.params()?;

    let nb_covs: Vec<Array2<f64>> = nb_params
        .vars
        .rows()
        .into_iter()
        .map(|v| Array2::from_diag(&v))
        .collect();
    let lda_covs = vec![lda_params.cov.clone(); lda_params.classes.len()];

    let classes = dataset.classes();
    let panels = vec![
        model_panel(
            &FittedGaussians {
                name: NAIVE_BAYES_NAME,
                accuracy: nb_acc,
                classes: &nb_params.classes,
                means: nb_params.mu.view(),
                covs: nb_covs,
            },
            dataset,
            &classes,
            scale,
        ),
        model_panel(
            &FittedGaussians {
                name: LDA_NAME,
                accuracy: lda_acc,
                classes: &lda_params.classes,
                means: lda_params.mu.view(),
                covs: lda_covs,
            },
            dataset,
            &classes,
            scale,
        ),
    ];

    let figure = Figure {
        title: format!(
            "Comparing Gaussian Classifiers - {} dataset",
            dataset_stem(dataset_name)
        ),
        width: 1000,
        height: 500,
        panels,
        show_legend: false,
        legend_title: None,
    };

    Ok(Comparison {
        figure,
        naive_bayes: ModelReport {
            name: NAIVE_BAYES_NAME,
            accuracy: nb_acc,
            means: nb_params.mu.clone(),
            predictions: nb_pred,
        },
        lda: ModelReport {
            name: LDA_NAME,
            accuracy: lda_acc,
            means: lda_params.mu.clone(),
            predictions: lda_pred,
        },
        file_name: comparison_file_name(dataset_name),
    })
}

fn points(rows: ArrayView2<f64>) -> Vec<(f64, f64)> {
    rows.rows().into_iter().map(|r| (r[0], r[1])).collect()
}

fn palette_index(classes: &[i64], label: i64) -> usize {
    classes.binary_search(&label).unwrap_or(0)
}

/// The class Gaussians one model fitted, one covariance per class.
struct FittedGaussians<'a> {
    name: &'static str,
    accuracy: f64,
    classes: &'a [i64],
    means: ArrayView2<'a, f64>,
    covs: Vec<Array2<f64>>,
}

fn model_panel(
    model: &FittedGaussians,
    dataset: &Dataset,
    dataset_classes: &[i64],
    scale: EllipseScale,
) -> Panel {
    let name = model.name;
    let mut panel = Panel::new(format!("{name} (accuracy {:.3})", model.accuracy));
    panel.x_label = "x1".into();
    panel.y_label = "x2".into();
    panel.equal_aspect = true;

    let colors = dataset
        .y()
        .iter()
        .map(|&label| palette_index(dataset_classes, label))
        .collect();
    panel.layers.push(Layer::markers(
        "Data Points",
        Marker::Circle,
        points(dataset.x()),
        Paint::PerPoint(colors),
    ));

    panel.layers.push(Layer::markers(
        format!("{name} Means"),
        Marker::Cross,
        points(model.means),
        Paint::Black,
    ));

    // one ellipse per fitted class, whatever their amount
    let classes = model.classes.iter().zip(model.means.rows()).zip(&model.covs);
    for ((label, mean), cov) in classes {
        let curve = ellipse_scaled(mean, cov.view(), scale);
        panel.layers.push(Layer::line(
            format!("{name} class {label}"),
            curve.into_points(),
            Paint::Black,
        ));
    }

    panel
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{
        geometry::ELLIPSE_POINTS,
        plots::figure::LayerKind,
    };

    fn clusters(offsets: &[(f64, f64)]) -> Dataset {
        let centers = [(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)];
        let spread = [
            [(-0.1, 0.0), (0.1, 0.0)],
            [(0.0, -0.1), (0.0, 0.1)],
            [(-0.1, -0.1), (0.1, 0.1)],
        ];

        let mut x = Vec::new();
        let mut y = Vec::new();
        for (k, (&(cx, cy), pair)) in centers.iter().zip(&spread).enumerate() {
            for &(dx, dy) in pair {
                let (ox, oy) = offsets.get(k).copied().unwrap_or((0.0, 0.0));
                x.extend([cx + dx + ox, cy + dy + oy]);
                y.push(k as i64);
            }
        }

        Dataset::new(Array2::from_shape_vec((6, 2), x).unwrap(), Array1::from(y)).unwrap()
    }

    #[test]
    fn separates_three_clusters_and_finds_centers() {
        let ds = clusters(&[]);
        let cmp = compare("gaussian0.npy", &ds, EllipseScale::Eigenvalue).unwrap();

        assert_eq!(cmp.naive_bayes.accuracy, 1.0);
        assert_eq!(cmp.lda.accuracy, 1.0);

        let centers = array![[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]];
        for report in [&cmp.naive_bayes, &cmp.lda] {
            for (m, c) in report.means.iter().zip(centers.iter()) {
                assert!((m - c).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn two_panels_with_shared_coloring() {
        let ds = clusters(&[]);
        let cmp = compare("gaussian0.npy", &ds, EllipseScale::Eigenvalue).unwrap();
        let panels = &cmp.figure.panels;

        assert_eq!(panels.len(), 2);
        assert!(panels[0].title.starts_with(NAIVE_BAYES_NAME));
        assert!(panels[1].title.starts_with(LDA_NAME));
        assert_eq!(panels[0].layers[0], panels[1].layers[0]);
        assert_eq!(
            panels[0].layers[0].paint,
            Paint::PerPoint(vec![0, 0, 1, 1, 2, 2])
        );

        for panel in panels {
            assert!(panel.equal_aspect);
            assert_eq!(panel.layers[1].kind, LayerKind::Markers(Marker::Cross));
            assert_eq!(panel.layers[1].points.len(), 3);

            let ellipses: Vec<_> = panel.layers[2..].iter().collect();
            assert_eq!(ellipses.len(), 3);
            for (layer, mean) in ellipses.iter().zip(&panel.layers[1].points) {
                assert_eq!(layer.kind, LayerKind::Line);
                assert_eq!(layer.points.len(), ELLIPSE_POINTS);

                let n = layer.points.len() as f64;
                let cx = layer.points[..ELLIPSE_POINTS - 1].iter().map(|p| p.0).sum::<f64>();
                let cy = layer.points[..ELLIPSE_POINTS - 1].iter().map(|p| p.1).sum::<f64>();
                assert!((cx / (n - 1.0) - mean.0).abs() < 0.05);
                assert!((cy / (n - 1.0) - mean.1).abs() < 0.05);
            }
        }
    }

    /// Offsets of an ellipse's points from its first point.
    fn shape(layer: &Layer) -> Vec<(f64, f64)> {
        let (x0, y0) = layer.points[0];
        layer.points.iter().map(|&(x, y)| (x - x0, y - y0)).collect()
    }

    fn same_shape(a: &Layer, b: &Layer) -> bool {
        shape(a)
            .iter()
            .zip(shape(b))
            .all(|(p, q)| (p.0 - q.0).abs() < 1e-9 && (p.1 - q.1).abs() < 1e-9)
    }

    #[test]
    fn each_panel_draws_its_own_model_covariances() {
        let cmp = compare("gaussian0.npy", &clusters(&[]), EllipseScale::StdDev).unwrap();
        let [nb, lda] = &cmp.figure.panels[..] else {
            panic!("expected two panels");
        };

        // shared covariance: every LDA ellipse is a translation of the first one
        assert!(same_shape(&lda.layers[2], &lda.layers[3]));
        assert!(same_shape(&lda.layers[2], &lda.layers[4]));

        // class 0 only spreads along x1 and class 1 only along x2
        assert!(!same_shape(&nb.layers[2], &nb.layers[3]));
        assert!(nb.layers[2].name.starts_with(NAIVE_BAYES_NAME));
        assert!(lda.layers[4].name.ends_with("class 2"));
    }

    #[test]
    fn one_ellipse_per_class_present() {
        let x = array![
            [0.0, 0.1],
            [0.2, -0.1],
            [4.0, 4.2],
            [4.1, 3.9],
        ];
        let ds = Dataset::new(x, array![0, 0, 1, 1]).unwrap();
        let cmp = compare("two.npy", &ds, EllipseScale::StdDev).unwrap();

        for panel in &cmp.figure.panels {
            assert_eq!(panel.layers.len(), 2 + 2);
        }
    }

    #[test]
    fn accuracy_matches_prediction_counts() {
        let ds = clusters(&[(0.0, 0.0), (-4.0, -4.0)]);
        let cmp = compare("overlap.npy", &ds, EllipseScale::Eigenvalue).unwrap();

        for report in [&cmp.naive_bayes, &cmp.lda] {
            let hits = report
                .predictions
                .iter()
                .zip(ds.y())
                .filter(|(p, t)| p == t)
                .count();
            assert_eq!(report.accuracy, hits as f64 / ds.len() as f64);
            assert!((0.0..=1.0).contains(&report.accuracy));
        }
    }

    #[test]
    fn names_follow_dataset_stem() {
        assert_eq!(dataset_stem("data/gaussian1.npy"), "gaussian1");
        assert_eq!(
            comparison_file_name("gaussian2.npy"),
            "lda_and_gaussian_naive_bayes_comparison.gaussian2.svg"
        );

        let cmp = compare("gaussian1.npy", &clusters(&[]), EllipseScale::Eigenvalue).unwrap();
        assert_eq!(
            cmp.figure.title,
            "Comparing Gaussian Classifiers - gaussian1 dataset"
        );
        assert!(!cmp.figure.show_legend);
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let ds = Dataset::new(array![[0.0], [1.0], [2.0], [3.0]], array![0, 0, 1, 1]).unwrap();
        assert!(matches!(
            compare("one_d.npy", &ds, EllipseScale::Eigenvalue),
            Err(PlotErr::Geometry(_))
        ));
    }
}
