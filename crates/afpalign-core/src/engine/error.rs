use thiserror::Error;

use super::config::ConfigError;
use crate::core::superposition::SuperpositionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Chain '{chain}' has {length} residues, at least {required} are required")]
    InsufficientData {
        chain: String,
        length: usize,
        required: usize,
    },

    #[error("Degenerate input: {source}")]
    DegenerateInput {
        #[from]
        source: SuperpositionError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Alignment cancelled during {phase}")]
    Cancelled { phase: &'static str },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
