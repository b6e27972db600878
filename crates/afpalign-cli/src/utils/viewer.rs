use afpalign::core::io::ca_trace::{CaTraceError, CaTraceFile};
use afpalign::core::io::traits::CoordinateFile;
use afpalign::core::models::block::Block;
use afpalign::core::models::coords::CoordinateSet;
use afpalign::core::models::result::AlignmentResult;
use afpalign::core::report::viewer::AlignmentViewer;
use std::path::PathBuf;
use tracing::info;

/// Exports the second chain, moved into the frame of the first, as a PDB Cα trace.
///
/// Each residue is moved by the transform of the block it belongs to; unaligned residues
/// follow the closest preceding block. A short alignment writes the chain unmoved.
pub struct PdbExportViewer {
    path: PathBuf,
}

impl PdbExportViewer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AlignmentViewer for PdbExportViewer {
    type Error = CaTraceError;

    fn show(
        &mut self,
        result: &AlignmentResult,
        _chain1: &CoordinateSet,
        chain2: &CoordinateSet,
    ) -> Result<(), Self::Error> {
        let superposed = superposed_trace(result.blocks(), chain2)?;
        CaTraceFile::write_to_path(&superposed, &self.path)?;
        info!(
            "Wrote superposed '{}' ({} blocks) to {:?}",
            chain2.name(),
            result.block_count(),
            self.path
        );
        Ok(())
    }
}

fn superposed_trace(blocks: &[Block], chain2: &CoordinateSet) -> Result<CoordinateSet, CaTraceError> {
    let points = chain2
        .points()
        .iter()
        .enumerate()
        .map(|(j, point)| match owning_block(blocks, j) {
            Some(block) => block.transform().apply(point),
            None => *point,
        })
        .collect();
    CoordinateSet::new(
        format!("{}_superposed", chain2.name()),
        points,
        chain2.labels().to_vec(),
    )
    .map_err(|e| CaTraceError::Inconsistency(e.to_string()))
}

fn owning_block(blocks: &[Block], j: usize) -> Option<&Block> {
    blocks
        .iter()
        .rev()
        .find(|b| b.first().1 <= j)
        .or_else(|| blocks.first())
}
