use afpalign::core::io::ca_trace::CaTraceError;
use afpalign::core::io::manifest::ManifestError;
use afpalign::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    AlignmentCore(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: CaTraceError,
    },

    #[error("Failed to write structure '{path}': {source}", path = path.display())]
    StructureOutput {
        path: PathBuf,
        #[source]
        source: CaTraceError,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
