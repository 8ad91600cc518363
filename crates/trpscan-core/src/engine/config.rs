use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONTACT_RADIUS: f64 = 5.0;
pub const DEFAULT_QUERY_RESIDUE: &str = "TRP";
pub const DEFAULT_QUERY_ATOM: &str = "NE1";
pub const DEFAULT_EXTENSION: &str = "pdb";
pub const DEFAULT_OUTPUT_FILE: &str = "donor_residue_info.csv";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Contact radius must be a finite, non-negative number (got {0})")]
    InvalidRadius(f64),
    #[error("Parameter '{0}' must not be empty")]
    EmptyValue(&'static str),
}

/// Parameters of the per-structure contact scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Neighbour search radius around each query atom, in Angstroms (inclusive).
    pub radius: f64,
    /// Residue name of the query atoms.
    pub query_residue: String,
    /// Atom name of the query atoms.
    pub query_atom: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CONTACT_RADIUS,
            query_residue: DEFAULT_QUERY_RESIDUE.to_string(),
            query_atom: DEFAULT_QUERY_ATOM.to_string(),
        }
    }
}

#[derive(Default)]
pub struct ScanConfigBuilder {
    radius: Option<f64>,
    query_residue: Option<String>,
    query_atom: Option<String>,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn query_residue(mut self, name: &str) -> Self {
        self.query_residue = Some(name.to_string());
        self
    }
    pub fn query_atom(mut self, name: &str) -> Self {
        self.query_atom = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let radius = self.radius.unwrap_or(DEFAULT_CONTACT_RADIUS);
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        let query_residue = self
            .query_residue
            .unwrap_or_else(|| DEFAULT_QUERY_RESIDUE.to_string())
            .trim()
            .to_string();
        if query_residue.is_empty() {
            return Err(ConfigError::EmptyValue("query_residue"));
        }
        let query_atom = self
            .query_atom
            .unwrap_or_else(|| DEFAULT_QUERY_ATOM.to_string())
            .trim()
            .to_string();
        if query_atom.is_empty() {
            return Err(ConfigError::EmptyValue("query_atom"));
        }
        Ok(ScanConfig {
            radius,
            query_residue,
            query_atom,
        })
    }
}

/// Parameters of a directory-wide run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Directory searched (non-recursively) for structure files.
    pub input_dir: PathBuf,
    /// File extension of structure files, without the dot.
    pub extension: String,
    /// The aggregate result table.
    pub output_path: PathBuf,
    /// Start a fresh result table instead of appending to an existing one.
    pub truncate_output: bool,
    /// Write each model of a multi-model entry to its own file beside the source.
    pub write_model_files: bool,
    pub scan: ScanConfig,
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    input_dir: Option<PathBuf>,
    extension: Option<String>,
    output_path: Option<PathBuf>,
    truncate_output: bool,
    write_model_files: bool,
    scan: Option<ScanConfig>,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_dir(mut self, path: PathBuf) -> Self {
        self.input_dir = Some(path);
        self
    }
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn truncate_output(mut self, truncate: bool) -> Self {
        self.truncate_output = truncate;
        self
    }
    pub fn write_model_files(mut self, write: bool) -> Self {
        self.write_model_files = write;
        self
    }
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan = Some(config);
        self
    }

    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        let extension = self
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
            .trim_start_matches('.')
            .to_string();
        if extension.is_empty() {
            return Err(ConfigError::EmptyValue("extension"));
        }
        Ok(BatchConfig {
            input_dir: self
                .input_dir
                .ok_or(ConfigError::MissingParameter("input_dir"))?,
            extension,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            truncate_output: self.truncate_output,
            write_model_files: self.write_model_files,
            scan: self.scan.unwrap_or_default(),
        })
    }
}
