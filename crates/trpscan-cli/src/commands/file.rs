use crate::cli::FileArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use std::io;
use tracing::{info, warn};
use trpscan::core::io::results::ContactSink;
use trpscan::workflows::scan;

pub fn run(args: FileArgs) -> Result<()> {
    let partial_config = PartialAppConfig::load(args.scan.config.as_deref())?;
    let config = partial_config.scan_config(&args.scan)?;
    let write_models = partial_config.write_models(args.write_models);

    info!("Scanning {:?}", &args.input);
    let report = scan::run(&args.input, &config, write_models)?;

    if report.models.is_empty() {
        warn!("No models were extracted from {:?}.", &args.input);
    }
    for (model, e) in report.failures() {
        warn!("Model {} failed: {}", model, e);
    }
    if !report.models.is_empty() && report.models.iter().all(|m| m.outcome.is_err()) {
        if let Some(Err(e)) = report.models.into_iter().next().map(|m| m.outcome) {
            return Err(e.into());
        }
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            let mut sink = ContactSink::append(path)?;
            let written = sink.write_all(report.records())?;
            sink.flush()?;
            info!("Appended {} contact(s) to {:?}", written, path);
            println!("✓ {} contact(s) written to {}", written, path.display());
        }
        None => {
            let mut sink = ContactSink::new(io::stdout().lock());
            sink.write_all(report.records())?;
            sink.flush()?;
        }
    }
    Ok(())
}
