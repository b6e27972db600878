pub mod align;
pub mod search;

use crate::error::{CliError, Result};
use afpalign::core::io::ca_trace::{CaTraceFile, TraceSelection};
use afpalign::core::io::traits::CoordinateFile;
use afpalign::core::models::coords::CoordinateSet;
use std::path::Path;
use tracing::info;

/// Reads one chain's Cα trace, naming it after the file stem and the chain identifier.
pub fn load_chain(path: &Path, chain: Option<char>) -> Result<CoordinateSet> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let name = match chain {
        Some(c) => format!("{}.{}", stem, c),
        None => stem,
    };
    load_named_chain(path, &name, chain)
}

pub fn load_named_chain(path: &Path, name: &str, chain: Option<char>) -> Result<CoordinateSet> {
    info!("Loading structure '{}' from {:?}", name, path);
    CaTraceFile::read_from_path(path, name, &TraceSelection { chain }).map_err(|source| {
        CliError::Structure {
            path: path.to_path_buf(),
            source,
        }
    })
}
