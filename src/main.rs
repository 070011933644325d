use anyhow::Context;
use classifier_plots::RunConfig;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = RunConfig::from_env().context("failed to build the run config")?;
    info!(
        "reading datasets from {}, writing figures to {}",
        config.datasets_dir.display(),
        config.output_dir.display()
    );

    let summary = classifier_plots::run(&config).context("plotting run failed")?;

    for outcome in &summary.training {
        info!(
            "{}: {} updates, final loss {:?}",
            outcome.label,
            outcome.iterations,
            outcome.final_loss()
        );
    }
    for outcome in &summary.comparisons {
        info!(
            "{}: naive Bayes accuracy {:.3}, LDA accuracy {:.3}",
            outcome.dataset, outcome.naive_bayes_accuracy, outcome.lda_accuracy
        );
    }

    Ok(())
}
