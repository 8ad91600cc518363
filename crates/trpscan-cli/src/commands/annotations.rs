use crate::cli::AnnotationArgs;
use crate::error::Result;
use tracing::info;
use trpscan::core::io::annotations;

pub fn run(args: AnnotationArgs) -> Result<()> {
    info!(
        "Extracting annotations for {:?} and {:?}",
        &args.first, &args.second
    );
    let summaries = annotations::extract_annotation_pair(&args.first, &args.second)?;
    for (base, summary) in [&args.first, &args.second].into_iter().zip(summaries) {
        println!(
            "✓ {}: {} secondary-structure and {} accessibility value(s)",
            base.display(),
            summary.secondary_structure_rows,
            summary.accessibility_rows
        );
    }
    Ok(())
}
