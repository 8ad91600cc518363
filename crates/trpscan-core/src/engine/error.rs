use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::results::ResultsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error(
        "Index inconsistency: self-query for query atom {query_index} resolved to {resolved:?}"
    )]
    IndexInconsistency {
        query_index: usize,
        resolved: Vec<usize>,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write results: {0}")]
    Results(#[from] ResultsError),
}
