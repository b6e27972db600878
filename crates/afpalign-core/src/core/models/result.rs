use super::algorithm::Algorithm;
use super::block::Block;
use super::coords::CoordinateSet;
use super::path::{AlignmentPath, GAP_SYMBOL};
use super::residue::{is_identical, is_similar};
use crate::core::report::format::java_scientific;
use nalgebra::Point3;
use std::fmt;

/// Statistics of the fragment chain before optimization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialChain {
    /// Number of fragments in the best chain.
    pub afp_count: usize,
    pub block_count: usize,
    /// Residue pairs covered by the initial blocks.
    pub aligned_len: usize,
    /// Pooled RMSD of the initial blocks, each under its own transform.
    pub rmsd: f64,
    /// RMSD of all initial pairs under a single rigid transform.
    pub chain_rmsd: f64,
}

/// Record of the optimizer's progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationTrace {
    /// Global score after the initial decomposition and after every accepted modification.
    pub score_history: Vec<f64>,
    pub cycles: usize,
    pub converged: bool,
}

/// Everything the pipeline hands over when it assembles a result.
#[derive(Debug, Clone)]
pub struct AlignmentParts {
    pub algorithm: Algorithm,
    pub afp_count: usize,
    pub fragment_length: usize,
    pub initial: InitialChain,
    pub blocks: Vec<Block>,
    pub score: f64,
    pub total_rmsd: f64,
    pub significance: f64,
    pub trace: OptimizationTrace,
}

/// The outcome of aligning two chains. Built once, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    algorithm: Algorithm,
    name1: String,
    name2: String,
    len1: usize,
    len2: usize,
    afp_count: usize,
    fragment_length: usize,
    initial: InitialChain,
    blocks: Vec<Block>,
    path: AlignmentPath,
    score: f64,
    total_rmsd: f64,
    significance: f64,
    identity: f64,
    similarity: f64,
    short_alignment: bool,
    trace: OptimizationTrace,
}

impl AlignmentResult {
    pub fn assemble(parts: AlignmentParts, chain1: &CoordinateSet, chain2: &CoordinateSet) -> Self {
        let path = AlignmentPath::build(&parts.blocks, chain1, chain2, parts.algorithm.symbol_style());
        let (identity, similarity) = identity_and_similarity(&path);
        Self {
            algorithm: parts.algorithm,
            name1: chain1.name().to_string(),
            name2: chain2.name().to_string(),
            len1: chain1.len(),
            len2: chain2.len(),
            afp_count: parts.afp_count,
            fragment_length: parts.fragment_length,
            initial: parts.initial,
            short_alignment: parts.blocks.is_empty(),
            blocks: parts.blocks,
            path,
            score: parts.score,
            total_rmsd: parts.total_rmsd,
            significance: parts.significance,
            identity,
            similarity,
            trace: parts.trace,
        }
    }

    /// A result flagged short/insignificant: no blocks, no aligned pairs.
    pub fn insignificant(
        algorithm: Algorithm,
        chain1: &CoordinateSet,
        chain2: &CoordinateSet,
        afp_count: usize,
        fragment_length: usize,
    ) -> Self {
        let parts = AlignmentParts {
            algorithm,
            afp_count,
            fragment_length,
            initial: InitialChain::default(),
            blocks: Vec::new(),
            score: 0.0,
            total_rmsd: 0.0,
            significance: algorithm.significance().insignificant_value(),
            trace: OptimizationTrace::default(),
        };
        Self::assemble(parts, chain1, chain2)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn name1(&self) -> &str {
        &self.name1
    }

    pub fn name2(&self) -> &str {
        &self.name2
    }

    pub fn len1(&self) -> usize {
        self.len1
    }

    pub fn len2(&self) -> usize {
        self.len2
    }

    pub fn min_len(&self) -> usize {
        self.len1.min(self.len2)
    }

    /// Number of candidate fragments found before chaining.
    pub fn afp_count(&self) -> usize {
        self.afp_count
    }

    pub fn fragment_length(&self) -> usize {
        self.fragment_length
    }

    pub fn initial(&self) -> &InitialChain {
        &self.initial
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn twists(&self) -> usize {
        self.blocks.len().saturating_sub(1)
    }

    pub fn path(&self) -> &AlignmentPath {
        &self.path
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Score divided by the length of the shorter chain.
    pub fn normalized_score(&self) -> f64 {
        match self.min_len() {
            0 => 0.0,
            n => self.score / n as f64,
        }
    }

    /// Pooled RMSD of the optimized blocks.
    pub fn total_rmsd(&self) -> f64 {
        self.total_rmsd
    }

    /// Z-score or P-value, depending on [`Algorithm::significance`].
    pub fn significance(&self) -> f64 {
        self.significance
    }

    pub fn is_significant(&self) -> bool {
        !self.short_alignment && self.algorithm.significance().is_significant(self.significance)
    }

    /// Fraction (0..=1) of aligned columns with identical residues.
    pub fn identity(&self) -> f64 {
        self.identity
    }

    /// Fraction (0..=1) of aligned columns with identical or similar residues.
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    pub fn is_short(&self) -> bool {
        self.short_alignment
    }

    pub fn trace(&self) -> &OptimizationTrace {
        &self.trace
    }

    /// Number of structurally equivalent residues.
    pub fn nr_eqr(&self) -> usize {
        self.path.len()
    }

    /// Length of the gapped alignment in columns.
    pub fn aln_length(&self) -> usize {
        self.path.gapped().len()
    }

    pub fn gap_len(&self) -> usize {
        self.path.gapped().gap_count()
    }

    /// Fraction of chain-1 residues that are aligned.
    pub fn coverage1(&self) -> f64 {
        ratio(self.nr_eqr(), self.len1)
    }

    pub fn coverage2(&self) -> f64 {
        ratio(self.nr_eqr(), self.len2)
    }

    /// Coverage of chain 1 as a rounded percentage.
    pub fn similarity1(&self) -> u32 {
        rounded_percent(self.nr_eqr(), self.len1)
    }

    pub fn similarity2(&self) -> u32 {
        rounded_percent(self.nr_eqr(), self.len2)
    }

    /// Chain-2 coordinates moved into the chain-1 frame, one copy per block.
    pub fn superposed_chain2(&self, chain2: &CoordinateSet) -> Vec<Vec<Point3<f64>>> {
        self.blocks.iter().map(|b| b.transformed(chain2)).collect()
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EQR:{}\tLen1:{}\tLen2:{}\tscore: {:.2}\t",
            self.nr_eqr(),
            self.len1,
            self.len2,
            self.score
        )?;
        match self.algorithm.significance() {
            super::algorithm::SignificanceKind::ZScore => {
                write!(f, "Z-score:{:.2}", self.significance)?
            }
            super::algorithm::SignificanceKind::PValue => {
                write!(f, "Probability:{}", java_scientific(self.significance, 2))?
            }
        }
        writeln!(
            f,
            "\tRMSD:{:.2}\tSim1:{}%\tSim2:{}%",
            self.total_rmsd,
            self.similarity1(),
            self.similarity2()
        )
    }
}

fn identity_and_similarity(path: &AlignmentPath) -> (f64, f64) {
    let gapped = path.gapped();
    let (mut aligned, mut identical, mut similar) = (0usize, 0usize, 0usize);
    for (a, b) in gapped.seq1.chars().zip(gapped.seq2.chars()) {
        if a == GAP_SYMBOL || b == GAP_SYMBOL {
            continue;
        }
        aligned += 1;
        if is_identical(a, b) {
            identical += 1;
        }
        if is_similar(a, b) {
            similar += 1;
        }
    }
    (ratio(identical, aligned), ratio(similar, aligned))
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn rounded_percent(numerator: usize, denominator: usize) -> u32 {
    (ratio(numerator, denominator) * 100.0 + 0.5).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::ResidueLabel;
    use crate::core::scoring::ScoreWeights;

    fn chain(name: &str, codes: &str) -> CoordinateSet {
        let points = (0..codes.len())
            .map(|i| {
                let t = i as f64;
                Point3::new(3.3 * t, (t * 1.3).sin() * 2.0, (t * 0.7).cos() * 2.0)
            })
            .collect();
        let labels = codes
            .chars()
            .enumerate()
            .map(|(i, c)| ResidueLabel::new(c, (i + 1).to_string()))
            .collect();
        CoordinateSet::new(name, points, labels).unwrap()
    }

    fn sample_result(algorithm: Algorithm) -> AlignmentResult {
        let c1 = chain("1abc.A", "ACDEFGHIKL");
        let c2 = chain("2xyz.B", "ACDEFGHIVLMN");
        let residues: Vec<usize> = (0..10).collect();
        let block = Block::build(
            &c1,
            &c2,
            residues.clone(),
            residues,
            vec![0],
            &ScoreWeights::default(),
        )
        .unwrap();
        let parts = AlignmentParts {
            algorithm,
            afp_count: 3,
            fragment_length: 8,
            initial: InitialChain {
                afp_count: 1,
                block_count: 1,
                aligned_len: 8,
                rmsd: 0.0,
                chain_rmsd: 0.0,
            },
            score: block.score(),
            total_rmsd: block.rmsd(),
            blocks: vec![block],
            significance: 4.2e-6,
            trace: OptimizationTrace::default(),
        };
        AlignmentResult::assemble(parts, &c1, &c2)
    }

    #[test]
    fn assemble_computes_identity_and_similarity() {
        let result = sample_result(Algorithm::FatCatFlexible);
        assert_eq!(result.nr_eqr(), 10);
        assert!((result.identity() - 0.9).abs() < 1e-12);
        assert!((result.similarity() - 1.0).abs() < 1e-12);
        assert!(!result.is_short());
    }

    #[test]
    fn coverage_percentages_round_half_up() {
        let result = sample_result(Algorithm::FatCatFlexible);
        assert_eq!(result.similarity1(), 100);
        assert_eq!(result.similarity2(), 83);
        assert!((result.coverage2() - 10.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn insignificant_result_has_no_blocks() {
        let c1 = chain("a", "ACDEFGHIKL");
        let result = AlignmentResult::insignificant(Algorithm::Ce, &c1, &c1, 0, 8);
        assert!(result.is_short());
        assert_eq!(result.block_count(), 0);
        assert_eq!(result.nr_eqr(), 0);
        assert_eq!(result.twists(), 0);
        assert!(!result.is_significant());
        assert_eq!(result.identity(), 0.0);
    }

    #[test]
    fn display_uses_metric_of_algorithm() {
        let fatcat = sample_result(Algorithm::FatCatFlexible).to_string();
        assert!(fatcat.starts_with("EQR:10\tLen1:10\tLen2:12\tscore: "));
        assert!(fatcat.contains("\tProbability:4.20e-06\tRMSD:0.00\tSim1:100%\tSim2:83%\n"));

        let ce = sample_result(Algorithm::Ce).to_string();
        assert!(ce.contains("\tZ-score:0.00\t"));
    }

    #[test]
    fn significance_follows_algorithm_metric() {
        assert!(sample_result(Algorithm::FatCatRigid).is_significant());
        assert!(!sample_result(Algorithm::Ce).is_significant());
    }
}
