use std::{collections::HashSet, env, fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{
    error::{PlotErr, Result},
    geometry::EllipseScale,
    plots::training_curve_file_name,
};

/// A perceptron run: the dataset it trains on and the label its curve gets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainingRun {
    pub label: String,
    pub file: String,
}

impl TrainingRun {
    pub fn new<L: Into<String>, F: Into<String>>(label: L, file: F) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
        }
    }
}

/// Everything a plotting run needs. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub datasets_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub max_iter: usize,
    /// Scan samples in a fresh seeded order every perceptron iteration instead of index order.
    pub shuffle: bool,
    pub ellipse_scale: EllipseScale,
    pub training_runs: Vec<TrainingRun>,
    pub comparisons: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            datasets_dir: PathBuf::from("datasets"),
            output_dir: PathBuf::from("figures"),
            seed: Some(0),
            max_iter: 1000,
            shuffle: false,
            ellipse_scale: EllipseScale::default(),
            training_runs: vec![
                TrainingRun::new("Linearly Separable", "linearly_separable.npy"),
                TrainingRun::new("Linearly Inseparable", "linearly_inseparable.npy"),
            ],
            comparisons: vec!["gaussian1.npy".into(), "gaussian2.npy".into()],
        }
    }
}

impl RunConfig {
    /// Reads a JSON config from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| PlotErr::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the config of the binary: the file named by `CLASSIFIER_PLOTS_CONFIG` if set,
    /// the defaults otherwise, then the environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("CLASSIFIER_PLOTS_CONFIG") {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields from `DATASETS_DIR`, `OUTPUT_DIR` and `SEED` as resolved by `lookup`.
    ///
    /// `SEED=none` (any case) asks for an entropy seed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DATASETS_DIR") {
            self.datasets_dir = dir.into();
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = dir.into();
        }
        if let Some(seed) = lookup("SEED") {
            self.seed = if seed.eq_ignore_ascii_case("none") {
                None
            } else {
                let seed = seed
                    .trim()
                    .parse()
                    .map_err(|e| PlotErr::Config(format!("SEED {seed:?}: {e}")))?;
                Some(seed)
            };
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(PlotErr::Config("max_iter must be positive".into()));
        }

        // two labels with the same artifact name would overwrite each other
        let mut artifacts = HashSet::new();
        for run in &self.training_runs {
            if run.file.is_empty() {
                return Err(PlotErr::Config(format!(
                    "training run {:?} has no dataset file",
                    run.label
                )));
            }
            if !artifacts.insert(training_curve_file_name(&run.label)) {
                return Err(PlotErr::Config(format!(
                    "duplicated training run label {:?}",
                    run.label
                )));
            }
        }

        if let Some(i) = self.comparisons.iter().position(String::is_empty) {
            return Err(PlotErr::Config(format!("comparison {i} has no dataset file")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_shipped_datasets() {
        let config = RunConfig::default();
        assert_eq!(config.seed, Some(0));
        assert_eq!(config.max_iter, 1000);
        assert!(!config.shuffle);
        assert_eq!(config.ellipse_scale, EllipseScale::Eigenvalue);
        assert_eq!(config.training_runs[1].file, "linearly_inseparable.npy");
        assert_eq!(config.comparisons, vec!["gaussian1.npy", "gaussian2.npy"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RunConfig::from_json(
            r#"{ "seed": null, "shuffle": true, "ellipse_scale": "std_dev", "comparisons": ["g.npy"] }"#,
        )
        .unwrap();

        assert!(config.shuffle);
        assert_eq!(config.seed, None);
        assert_eq!(config.ellipse_scale, EllipseScale::StdDev);
        assert_eq!(config.comparisons, vec!["g.npy"]);
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.training_runs.len(), 2);
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            RunConfig::from_json(r#"{ "max_iter": "many" }"#),
            Err(PlotErr::Config(_))
        ));
        assert!(matches!(
            RunConfig::from_json(r#"{ "max_iter": 0 }"#),
            Err(PlotErr::Config(_))
        ));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "max_iter": 25, "datasets_dir": "data" }"#).unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.max_iter, 25);
        assert_eq!(config.datasets_dir, PathBuf::from("data"));

        assert!(matches!(
            RunConfig::load(dir.path().join("missing.json")),
            Err(PlotErr::Io(_))
        ));
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = RunConfig::default();
        config
            .apply_overrides(lookup(&[("OUTPUT_DIR", "out"), ("SEED", " 42 ")]))
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.datasets_dir, PathBuf::from("datasets"));
        assert_eq!(config.seed, Some(42));

        config.apply_overrides(lookup(&[("SEED", "None")])).unwrap();
        assert_eq!(config.seed, None);

        assert!(matches!(
            config.apply_overrides(lookup(&[("SEED", "-1")])),
            Err(PlotErr::Config(_))
        ));
    }

    #[test]
    fn duplicated_labels_are_rejected() {
        let mut config = RunConfig::default();
        config
            .training_runs
            .push(TrainingRun::new("linearly separable", "other.npy"));
        assert!(matches!(config.validate(), Err(PlotErr::Config(_))));
    }
}
