use serde::Deserialize;

/// Weights of the alignment score `length − gap·gaps − rmsd·RMSD − twist·twists`.
///
/// The same formula scores individual fragments during chaining, blocks, and whole
/// alignments during optimization.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ScoreWeights {
    pub gap_penalty: f64,
    pub rmsd_penalty: f64,
    pub twist_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            gap_penalty: 0.5,
            rmsd_penalty: 1.0,
            twist_penalty: 5.0,
        }
    }
}

impl ScoreWeights {
    pub fn score(&self, aligned: usize, gaps: usize, rmsd: f64, twists: usize) -> f64 {
        aligned as f64
            - self.gap_penalty * gaps as f64
            - self.rmsd_penalty * rmsd
            - self.twist_penalty * twists as f64
    }

    /// Score of a single gap-free, twist-free fragment.
    #[inline]
    pub fn fragment_score(&self, len: usize, rmsd: f64) -> f64 {
        self.score(len, 0, rmsd, 0)
    }
}
