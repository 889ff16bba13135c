use crate::cli::BuildArgs;
use crate::config::PartialBuildConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmgraph::{
    core::descriptors::slater::SlaterOverlapOracle, engine::progress::ProgressReporter, workflows,
};
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialBuildConfig::from_file(path)?,
        None => PartialBuildConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building dataset from {}...", config.source.display());
    info!(
        source = %config.source.display(),
        prop_len = config.property_count,
        cutoff = config.cutoff,
        "Invoking the dataset build workflow..."
    );

    let dataset = workflows::build::run(&config, &SlaterOverlapOracle, &reporter)?;

    let artifact = config.artifact_path()?;
    info!(
        "Workflow finished, dataset holds {} graph(s).",
        dataset.len()
    );
    println!(
        "✓ Dataset with {} graph(s) available at: {}",
        dataset.len(),
        artifact.display()
    );

    Ok(())
}
