use crate::cli::ScanArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use trpscan::engine::progress::ProgressReporter;
use trpscan::workflows::batch;

pub fn run(args: ScanArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialAppConfig::load(args.scan.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scanning '.{}' files in {} for {}/{} contacts within {:.2} Å...",
        config.extension,
        config.input_dir.display(),
        config.scan.query_residue,
        config.scan.query_atom,
        config.scan.radius
    );
    let summary = batch::run(&config, &reporter)?;

    println!(
        "✓ {} file(s), {} model(s) analysed; {} contact(s) written to {}",
        summary.files_found,
        summary.models_analyzed,
        summary.contacts_written,
        config.output_path.display()
    );
    if !summary.failures.is_empty() {
        warn!("{} failure(s) during the batch.", summary.failures.len());
        println!("  {} failure(s):", summary.failures.len());
        for failure in &summary.failures {
            match failure.model {
                Some(model) => println!(
                    "    {} (model {}): {}",
                    failure.path.display(),
                    model,
                    failure.message
                ),
                None => println!("    {}: {}", failure.path.display(), failure.message),
            }
        }
    }
    Ok(())
}
