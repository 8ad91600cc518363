use super::scan::{self, FileReport};
use crate::core::io::pdb;
use crate::core::io::results::ContactSink;
use crate::core::models::structure::ModelId;
use crate::engine::config::BatchConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A file or model that could not be analysed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub path: PathBuf,
    /// The failed model, or `None` when the whole file could not be read.
    pub model: Option<ModelId>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub files_found: usize,
    pub files_failed: usize,
    pub models_analyzed: usize,
    pub models_failed: usize,
    pub contacts_written: usize,
    pub failures: Vec<BatchFailure>,
}

/// Lists the structure files directly inside `dir` with the given extension,
/// sorted by path.
///
/// Model files written by an earlier run are left out.
pub fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, EngineError> {
    let io_err = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let is_model_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(pdb::is_model_file_name);
        if !is_model_file {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Scans every structure file of `config.input_dir` and writes all contacts to
/// `config.output_path`.
///
/// The output is appended to unless `config.truncate_output` is set.
#[instrument(skip_all, name = "batch_workflow", fields(dir = %config.input_dir.display()))]
pub fn run(config: &BatchConfig, reporter: &ProgressReporter) -> Result<BatchSummary, EngineError> {
    let mut sink = if config.truncate_output {
        ContactSink::create(&config.output_path)?
    } else {
        ContactSink::append(&config.output_path)?
    };
    let summary = run_with_sink(config, &mut sink, reporter)?;
    info!(
        "Wrote {} contact(s) to {:?}.",
        summary.contacts_written, config.output_path
    );
    Ok(summary)
}

/// Same as [`run`], writing to a caller-supplied sink.
///
/// Files are analysed independently (in parallel with the `parallel` feature)
/// and their records are written in sorted-path order once all are done.
pub fn run_with_sink<W: Write>(
    config: &BatchConfig,
    sink: &mut ContactSink<W>,
    reporter: &ProgressReporter,
) -> Result<BatchSummary, EngineError> {
    let inputs = discover_inputs(&config.input_dir, &config.extension)?;
    info!(
        "Found {} '.{}' file(s) in {:?}.",
        inputs.len(),
        config.extension,
        config.input_dir
    );
    reporter.report(Progress::BatchStart {
        total_files: inputs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = inputs.iter();

    #[cfg(feature = "parallel")]
    let iterator = inputs.par_iter();

    let outcomes: Vec<Result<FileReport, EngineError>> = iterator
        .map(|path| {
            let outcome = scan::run(path, &config.scan, config.write_model_files);
            let (contacts, failed) = match &outcome {
                Ok(report) => (report.contact_count(), report.has_failures()),
                Err(_) => (0, true),
            };
            reporter.report(Progress::FileFinished {
                name: display_name(path),
                contacts,
                failed,
            });
            outcome
        })
        .collect();

    let mut summary = BatchSummary {
        files_found: inputs.len(),
        ..Default::default()
    };
    let rows_before = sink.rows_written();

    for (path, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok(report) => {
                summary.models_analyzed += report.models.len();
                sink.write_all(report.records())?;
                for (model, e) in report.failures() {
                    summary.models_failed += 1;
                    summary.failures.push(BatchFailure {
                        path: path.clone(),
                        model: Some(model),
                        message: e.to_string(),
                    });
                }
            }
            Err(e) => {
                error!("Skipping {:?}: {}", path, e);
                summary.files_failed += 1;
                summary.failures.push(BatchFailure {
                    path: path.clone(),
                    model: None,
                    message: e.to_string(),
                });
            }
        }
    }
    sink.flush()?;
    summary.contacts_written = sink.rows_written() - rows_before;

    if !summary.failures.is_empty() {
        warn!(
            "{} file(s) and {} model(s) could not be analysed.",
            summary.files_failed, summary.models_failed
        );
    }
    reporter.report(Progress::BatchFinish);
    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
