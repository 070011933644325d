use std::{
    fs,
    path::{Path, PathBuf},
};

use learners::{DatasetSource, Perceptron};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::RunConfig,
    error::Result,
    plots::{compare, render_svg, training_curve, training_curve_file_name},
    tracking::{LossTrace, LossTracker},
};

/// How the perceptron did on one training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub label: String,
    pub iterations: usize,
    pub losses: LossTrace,
    pub artifact: PathBuf,
}

impl TrainingOutcome {
    /// The loss after the last update, `None` if the data was separated from the start.
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last()
    }
}

/// How both Gaussian classifiers did on one dataset.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub dataset: String,
    pub naive_bayes_accuracy: f64,
    pub lda_accuracy: f64,
    pub artifact: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub training: Vec<TrainingOutcome>,
    pub comparisons: Vec<ComparisonOutcome>,
}

impl RunSummary {
    /// Every written file, in writing order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Path> {
        self.training
            .iter()
            .map(|t| t.artifact.as_path())
            .chain(self.comparisons.iter().map(|c| c.artifact.as_path()))
    }
}

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Runs every configured training run and comparison, in order, writing one SVG per item into
/// the output directory. The first failure aborts the run.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir)?;

    let source = DatasetSource::new(config.datasets_dir.clone());
    let mut rng = generate_rng(config.seed);

    let training = run_perceptron(config, &source, &mut rng)?;
    let comparisons = compare_gaussian_classifiers(config, &source)?;

    let summary = RunSummary {
        training,
        comparisons,
    };
    info!(
        "wrote {} figure(s) to {}",
        summary.artifacts().count(),
        config.output_dir.display()
    );
    Ok(summary)
}

/// Fits a perceptron on every training run dataset and plots its loss after every update.
///
/// Samples are scanned in index order unless `config.shuffle` is set, in which case each
/// perceptron shuffles with its own generator drawn from `rng`.
pub fn run_perceptron(
    config: &RunConfig,
    source: &DatasetSource,
    rng: &mut StdRng,
) -> Result<Vec<TrainingOutcome>> {
    let mut outcomes = Vec::with_capacity(config.training_runs.len());

    for run in &config.training_runs {
        let dataset = source.load(&run.file)?;
        info!("{}: loaded {} samples from {}", run.label, dataset.len(), run.file);

        let mut tracker = LossTracker::new(dataset.x(), dataset.y());
        let mut perceptron = Perceptron::new(true, config.max_iter);
        if config.shuffle {
            perceptron = perceptron.with_rng(StdRng::from_rng(&mut *rng));
        }
        perceptron.fit_observed(dataset.x(), dataset.y(), &mut tracker)?;

        let losses = tracker.into_trace();
        match losses.last() {
            Some(loss) => info!(
                "{}: {} perceptron updates, final loss {loss:.4}",
                run.label,
                perceptron.iterations()
            ),
            None => info!("{}: separated without any update", run.label),
        }

        let artifact = config.output_dir.join(training_curve_file_name(&run.label));
        render_svg(&training_curve(&losses, &run.label), &artifact)?;
        info!("{}: wrote {}", run.label, artifact.display());

        outcomes.push(TrainingOutcome {
            label: run.label.clone(),
            iterations: perceptron.iterations(),
            losses,
            artifact,
        });
    }

    Ok(outcomes)
}

/// Fits Gaussian Naive Bayes and LDA on every comparison dataset and plots them side by side.
pub fn compare_gaussian_classifiers(
    config: &RunConfig,
    source: &DatasetSource,
) -> Result<Vec<ComparisonOutcome>> {
    let mut outcomes = Vec::with_capacity(config.comparisons.len());

    for name in &config.comparisons {
        let dataset = source.load(name)?;
        info!("{name}: loaded {} samples", dataset.len());

        let comparison = compare(name, &dataset, config.ellipse_scale)?;
        let artifact = config.output_dir.join(&comparison.file_name);
        render_svg(&comparison.figure, &artifact)?;
        info!("{name}: wrote {}", artifact.display());

        outcomes.push(ComparisonOutcome {
            dataset: name.clone(),
            naive_bayes_accuracy: comparison.naive_bayes.accuracy,
            lda_accuracy: comparison.lda.accuracy,
            artifact,
        });
    }

    Ok(outcomes)
}
