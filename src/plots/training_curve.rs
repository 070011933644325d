use super::figure::{Figure, Layer, Paint, Panel};
use crate::tracking::LossTrace;

pub const TRAINING_CURVE_TITLE: &str = "Perceptron Training Loss Progression";

/// Builds a line chart of `losses` against their iteration index.
///
/// # Arguments
/// * `losses` - The trace of a training run.
/// * `label` - The name of the run, shown in the legend.
pub fn training_curve(losses: &LossTrace, label: &str) -> Figure {
    let points = losses
        .iter()
        .enumerate()
        .map(|(i, loss)| (i as f64, loss))
        .collect();

    let mut panel = Panel::new("");
    panel.x_label = "Iteration".into();
    panel.y_label = "Training Loss".into();
    panel.layers.push(Layer::line(label, points, Paint::Indexed(0)));

    Figure {
        title: TRAINING_CURVE_TITLE.into(),
        width: 700,
        height: 500,
        panels: vec![panel],
        show_legend: true,
        legend_title: Some("Dataset".into()),
    }
}

/// The artifact name of the training curve of the run called `label`.
pub fn training_curve_file_name(label: &str) -> String {
    format!("perceptron_fit_{}.svg", slug(label))
}

/// Lowercases `label` and collapses every run of non alphanumeric characters into `_`.
fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    out
}
