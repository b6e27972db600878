use crate::core::models::block::{Block, count_internal_gaps};
use crate::core::scoring::ScoreWeights;
use crate::core::utils::geometry::pooled_rmsd;

/// Smallest score gain that counts as an improvement.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Phases of block refinement. One cycle visits the four working phases in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerPhase {
    Extending,
    Splitting,
    Merging,
    Trimming,
    Converged,
}

impl OptimizerPhase {
    pub fn name(&self) -> &'static str {
        match self {
            OptimizerPhase::Extending => "extending",
            OptimizerPhase::Splitting => "splitting",
            OptimizerPhase::Merging => "merging",
            OptimizerPhase::Trimming => "trimming",
            OptimizerPhase::Converged => "converged",
        }
    }

    /// Phase after the current pass. `cycle_accepted` tells whether any pass of the
    /// current cycle accepted a modification; it only matters at the end of a cycle.
    pub fn advance(self, cycle_accepted: bool) -> Self {
        match self {
            OptimizerPhase::Extending => OptimizerPhase::Splitting,
            OptimizerPhase::Splitting => OptimizerPhase::Merging,
            OptimizerPhase::Merging => OptimizerPhase::Trimming,
            OptimizerPhase::Trimming if cycle_accepted => OptimizerPhase::Extending,
            OptimizerPhase::Trimming | OptimizerPhase::Converged => OptimizerPhase::Converged,
        }
    }
}

/// Score of a whole block decomposition.
///
/// Gaps are counted along the complete path, between blocks as well as inside them;
/// every block after the first counts as one twist.
pub fn global_score(blocks: &[Block], weights: &ScoreWeights) -> f64 {
    let residues1: Vec<usize> = blocks
        .iter()
        .flat_map(|b| b.residues1().iter().copied())
        .collect();
    let residues2: Vec<usize> = blocks
        .iter()
        .flat_map(|b| b.residues2().iter().copied())
        .collect();
    let rmsd = pooled_rmsd(blocks.iter().map(|b| (b.len(), b.rmsd())));
    weights.score(
        residues1.len(),
        count_internal_gaps(&residues1, &residues2),
        rmsd,
        blocks.len().saturating_sub(1),
    )
}

/// The block decomposition under refinement, with the history of accepted scores.
#[derive(Debug, Clone)]
pub struct AlignmentState {
    blocks: Vec<Block>,
    score: f64,
    history: Vec<f64>,
}

impl AlignmentState {
    pub fn new(blocks: Vec<Block>, weights: &ScoreWeights) -> Self {
        let score = global_score(&blocks, weights);
        Self {
            blocks,
            score,
            history: vec![score],
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Replaces the decomposition with `candidate` only if that strictly raises the score.
    pub fn try_replace(&mut self, candidate: Vec<Block>, weights: &ScoreWeights) -> bool {
        let score = global_score(&candidate, weights);
        if score > self.score + SCORE_EPSILON {
            self.blocks = candidate;
            self.score = score;
            self.history.push(score);
            true
        } else {
            false
        }
    }

    pub fn into_parts(self) -> (Vec<Block>, f64, Vec<f64>) {
        (self.blocks, self.score, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::coords::CoordinateSet;
    use nalgebra::Point3;

    fn zigzag(n: usize) -> CoordinateSet {
        let points = (0..n)
            .map(|i| {
                let t = i as f64;
                Point3::new(3.3 * t, if i % 2 == 0 { 1.0 } else { -1.0 }, 0.3 * t * t)
            })
            .collect();
        CoordinateSet::from_points("zigzag", points, 'A')
    }

    fn block(chain: &CoordinateSet, from: usize, to: usize) -> Block {
        let r: Vec<usize> = (from..to).collect();
        Block::build(chain, chain, r.clone(), r, vec![], &ScoreWeights::default()).unwrap()
    }

    #[test]
    fn phases_cycle_until_a_cycle_accepts_nothing() {
        let mut phase = OptimizerPhase::Extending;
        let mut visited = vec![phase];
        for accepted in [true, true, true, true] {
            phase = phase.advance(accepted);
            visited.push(phase);
        }
        assert_eq!(phase, OptimizerPhase::Extending);
        for _ in 0..4 {
            phase = phase.advance(false);
        }
        assert_eq!(phase, OptimizerPhase::Converged);
        assert_eq!(phase.advance(true), OptimizerPhase::Converged);
        assert_eq!(visited[3], OptimizerPhase::Trimming);
    }

    #[test]
    fn global_score_counts_gaps_between_blocks_and_twists() {
        let chain = zigzag(20);
        let weights = ScoreWeights {
            gap_penalty: 1.0,
            rmsd_penalty: 0.0,
            twist_penalty: 2.0,
        };
        let blocks = vec![block(&chain, 0, 5), block(&chain, 8, 12)];
        assert!((global_score(&blocks, &weights) - (9.0 - 3.0 - 2.0)).abs() < 1e-9);
        assert_eq!(global_score(&[], &weights), 0.0);
    }

    #[test]
    fn try_replace_accepts_only_strict_improvements() {
        let chain = zigzag(20);
        let weights = ScoreWeights::default();
        let mut state = AlignmentState::new(vec![block(&chain, 0, 10)], &weights);

        assert!(!state.try_replace(vec![block(&chain, 0, 10)], &weights));
        assert!(!state.try_replace(vec![block(&chain, 0, 9)], &weights));
        assert!(state.try_replace(vec![block(&chain, 0, 12)], &weights));

        assert_eq!(state.blocks()[0].len(), 12);
        assert_eq!(state.history().len(), 2);
        assert!(state.history()[1] > state.history()[0]);
    }
}
