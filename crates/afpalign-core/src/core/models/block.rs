use crate::core::models::coords::CoordinateSet;
use crate::core::scoring::ScoreWeights;
use crate::core::superposition::{Superposition, SuperpositionError, Transform, superpose};
use nalgebra::Point3;

/// A run of structurally equivalent residue pairs sharing one rigid-body transform.
///
/// Residue indices are strictly increasing in both chains. The transform maps chain-2
/// coordinates onto chain 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    residues1: Vec<usize>,
    residues2: Vec<usize>,
    afps: Vec<usize>,
    transform: Transform,
    rmsd: f64,
    gaps: usize,
    score: f64,
}

impl Block {
    /// Superposes the given residue pairs and assembles the block.
    ///
    /// `afps` records which fragments the block was built from; it only feeds reports.
    ///
    /// # Errors
    ///
    /// Propagates [`SuperpositionError`] when the pairs cannot be superposed.
    pub fn build(
        chain1: &CoordinateSet,
        chain2: &CoordinateSet,
        residues1: Vec<usize>,
        residues2: Vec<usize>,
        afps: Vec<usize>,
        weights: &ScoreWeights,
    ) -> Result<Self, SuperpositionError> {
        debug_assert!(is_strictly_increasing(&residues1) && is_strictly_increasing(&residues2));
        let Superposition { transform, rmsd } =
            superpose(&chain1.gather(&residues1), &chain2.gather(&residues2))?;
        let gaps = count_internal_gaps(&residues1, &residues2);
        let score = weights.score(residues1.len(), gaps, rmsd, 0);
        Ok(Self {
            residues1,
            residues2,
            afps,
            transform,
            rmsd,
            gaps,
            score,
        })
    }

    pub fn len(&self) -> usize {
        self.residues1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues1.is_empty()
    }

    pub fn residues1(&self) -> &[usize] {
        &self.residues1
    }

    pub fn residues2(&self) -> &[usize] {
        &self.residues2
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.residues1.iter().copied().zip(self.residues2.iter().copied())
    }

    /// First aligned pair. Blocks are never empty once built.
    pub fn first(&self) -> (usize, usize) {
        (self.residues1[0], self.residues2[0])
    }

    pub fn last(&self) -> (usize, usize) {
        let n = self.len() - 1;
        (self.residues1[n], self.residues2[n])
    }

    pub fn afps(&self) -> &[usize] {
        &self.afps
    }

    pub fn afp_count(&self) -> usize {
        self.afps.len()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn rmsd(&self) -> f64 {
        self.rmsd
    }

    pub fn gaps(&self) -> usize {
        self.gaps
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Chain-2 points moved into the chain-1 frame by this block's transform.
    pub fn transformed(&self, chain2: &CoordinateSet) -> Vec<Point3<f64>> {
        self.transform.apply_all(chain2.points())
    }
}

/// Counts unaligned positions strictly inside a run of pairs: for each step between
/// consecutive pairs, the longer of the two skipped stretches.
pub fn count_internal_gaps(residues1: &[usize], residues2: &[usize]) -> usize {
    residues1
        .windows(2)
        .zip(residues2.windows(2))
        .map(|(w1, w2)| (w1[1] - w1[0] - 1).max(w2[1] - w2[0] - 1))
        .sum()
}

fn is_strictly_increasing(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
