use crate::core::io::pdb;
use crate::core::models::contact::ContactRecord;
use crate::core::models::structure::{ModelId, Structure};
use crate::engine::config::ScanConfig;
use crate::engine::error::EngineError;
use crate::engine::scanner::ContactScanner;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// The outcome of scanning one model.
#[derive(Debug)]
pub struct ModelReport {
    pub model: ModelId,
    pub outcome: Result<Vec<ContactRecord>, EngineError>,
}

/// The outcome of scanning every model of one structure file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub models: Vec<ModelReport>,
}

impl FileReport {
    /// Records of the successfully scanned models, in model order.
    pub fn records(&self) -> impl Iterator<Item = &ContactRecord> {
        self.models
            .iter()
            .filter_map(|m| m.outcome.as_ref().ok())
            .flatten()
    }

    pub fn contact_count(&self) -> usize {
        self.records().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (ModelId, &EngineError)> {
        self.models
            .iter()
            .filter_map(|m| m.outcome.as_ref().err().map(|e| (m.model, e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Scans one structure file.
///
/// Multi-model entries are split and each model is parsed and scanned on its own,
/// so a malformed model only fails that model. With `write_model_files`, the split
/// models are also written beside `path`.
///
/// # Errors
///
/// Returns an error only when the file cannot be read or the model files cannot
/// be written.
#[instrument(skip_all, name = "scan_workflow", fields(path = %path.display()))]
pub fn run(
    path: &Path,
    config: &ScanConfig,
    write_model_files: bool,
) -> Result<FileReport, EngineError> {
    let io_err = |source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = fs::read_to_string(path).map_err(io_err)?;

    if write_model_files && pdb::is_multi_model(&text) {
        let written = pdb::write_model_files(path, &pdb::split_models(&text)).map_err(io_err)?;
        debug!("Wrote {} model file(s).", written.len());
    }

    let report = analyze(&text, path, config);
    info!(
        "Scanned {} model(s): {} contact(s), {} failure(s).",
        report.models.len(),
        report.contact_count(),
        report.failures().count()
    );
    Ok(report)
}

/// Scans structure text that was read from `path`.
///
/// The file name of `path` is the source identifier of every model.
pub fn analyze(text: &str, path: &Path, config: &ScanConfig) -> FileReport {
    let source_id = source_name(path);
    let scanner = ContactScanner::new(config);

    let models = pdb::model_segments(text)
        .into_iter()
        .map(|segment| {
            let outcome = pdb::parse_atoms(segment.text, segment.first_line)
                .map_err(|source| EngineError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
                .and_then(|atoms| {
                    scanner.scan(&Structure::new(source_id.as_str(), segment.model, atoms))
                });
            if let Err(e) = &outcome {
                warn!("Model {} of {:?} failed: {}", segment.model, path, e);
            }
            ModelReport {
                model: segment.model,
                outcome,
            }
        })
        .collect();

    FileReport {
        path: path.to_path_buf(),
        models,
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
