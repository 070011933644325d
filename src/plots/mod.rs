mod comparison;
mod figure;
mod render;
mod training_curve;

pub use comparison::{
    compare, comparison_file_name, dataset_stem, Comparison, ModelReport, LDA_NAME,
    NAIVE_BAYES_NAME,
};
pub use figure::{Bounds, Figure, Layer, LayerKind, Marker, Paint, Panel};
pub use render::render_svg;
pub use training_curve::{training_curve, training_curve_file_name, TRAINING_CURVE_TITLE};
