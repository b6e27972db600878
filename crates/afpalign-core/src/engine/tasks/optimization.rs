use crate::core::models::afp::Afp;
use crate::core::models::block::{Block, count_internal_gaps};
use crate::core::models::result::OptimizationTrace;
use crate::core::utils::geometry::{centroid, find_max_deviation, rotation_angle_between};
use crate::engine::context::AlignmentContext;
use crate::engine::error::EngineError;
use crate::engine::state::{AlignmentState, OptimizerPhase, global_score};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub blocks: Vec<Block>,
    pub score: f64,
    pub trace: OptimizationTrace,
}

#[derive(Debug, Clone, Copy)]
enum Extension {
    Append,
    Prepend,
    FillGaps,
}

/// Refines the initial blocks by cycling through extension, splitting, merging and
/// trimming until a full cycle changes nothing or the iteration cap is reached.
///
/// Every modification is kept only if it strictly raises the global score, so the score
/// history never decreases. `afps` are the chained fragments the block provenance
/// indices point into.
#[instrument(skip_all, name = "optimization_task")]
pub fn run(
    context: &AlignmentContext,
    afps: &[Afp],
    blocks: Vec<Block>,
) -> Result<OptimizationOutcome, EngineError> {
    let config = &context.config.optimization;
    let weights = &context.config.scoring;

    let initial = blocks.len();
    let viable: Vec<Block> = blocks
        .into_iter()
        .filter(|b| b.len() >= config.min_block_size)
        .collect();
    if viable.len() < initial {
        debug!(
            "Dropped {} initial blocks shorter than {} residues.",
            initial - viable.len(),
            config.min_block_size
        );
    }

    let mut state = AlignmentState::new(viable, weights);
    let mut phase = OptimizerPhase::Extending;
    let mut cycles = 0;
    let mut cycle_accepted = false;
    let mut converged = true;

    while phase != OptimizerPhase::Converged {
        context.ensure_active("optimization")?;
        if phase == OptimizerPhase::Extending {
            cycle_accepted = false;
        }
        let accepted = match phase {
            OptimizerPhase::Extending => extend_pass(context, &mut state),
            OptimizerPhase::Splitting => split_pass(context, afps, &mut state),
            OptimizerPhase::Merging => merge_pass(context, &mut state),
            OptimizerPhase::Trimming => trim_pass(context, &mut state),
            OptimizerPhase::Converged => false,
        };
        trace!(phase = phase.name(), accepted, score = state.score());
        cycle_accepted |= accepted;

        if phase == OptimizerPhase::Trimming {
            cycles += 1;
            if cycle_accepted && cycles >= config.max_iterations {
                debug!("Stopping after {} cycles without convergence.", cycles);
                converged = false;
                break;
            }
        }
        phase = phase.advance(cycle_accepted);
    }

    debug!(
        "Optimization finished after {} cycles with {} blocks, score {:.2}.",
        cycles,
        state.blocks().len(),
        state.score()
    );
    let (blocks, score, score_history) = state.into_parts();
    Ok(OptimizationOutcome {
        blocks,
        score,
        trace: OptimizationTrace {
            score_history,
            cycles,
            converged,
        },
    })
}

fn extend_pass(context: &AlignmentContext, state: &mut AlignmentState) -> bool {
    let weights = &context.config.scoring;
    let mut accepted = false;
    for index in 0..state.blocks().len() {
        loop {
            let mut grew = false;
            for kind in [Extension::Append, Extension::Prepend, Extension::FillGaps] {
                if let Some(candidate) = extended(context, state.blocks(), index, kind) {
                    grew |= state.try_replace(candidate, weights);
                }
            }
            if !grew {
                break;
            }
            accepted = true;
        }
    }
    accepted
}

fn extended(
    context: &AlignmentContext,
    blocks: &[Block],
    index: usize,
    kind: Extension,
) -> Option<Vec<Block>> {
    let block = &blocks[index];
    let mut residues1 = block.residues1().to_vec();
    let mut residues2 = block.residues2().to_vec();
    let added: Vec<(usize, usize)> = match kind {
        Extension::Append => {
            let (l1, l2) = block.last();
            let (n1, n2) = (l1 + 1, l2 + 1);
            let (limit1, limit2) = blocks
                .get(index + 1)
                .map(|next| next.first())
                .unwrap_or((context.chain1.len(), context.chain2.len()));
            if n1 >= limit1 || n2 >= limit2 {
                return None;
            }
            residues1.push(n1);
            residues2.push(n2);
            vec![(n1, n2)]
        }
        Extension::Prepend => {
            let (f1, f2) = block.first();
            if f1 == 0 || f2 == 0 {
                return None;
            }
            let (p1, p2) = (f1 - 1, f2 - 1);
            if let Some(prev) = index.checked_sub(1).map(|i| &blocks[i]) {
                let (l1, l2) = prev.last();
                if p1 <= l1 || p2 <= l2 {
                    return None;
                }
            }
            residues1.insert(0, p1);
            residues2.insert(0, p2);
            vec![(p1, p2)]
        }
        Extension::FillGaps => {
            let mut filled1 = Vec::with_capacity(residues1.len());
            let mut filled2 = Vec::with_capacity(residues2.len());
            let mut added = Vec::new();
            for (k, (&i, &j)) in residues1.iter().zip(&residues2).enumerate() {
                if k > 0 {
                    let (pi, pj) = (residues1[k - 1], residues2[k - 1]);
                    if i - pi == j - pj {
                        for step in 1..(i - pi) {
                            filled1.push(pi + step);
                            filled2.push(pj + step);
                            added.push((pi + step, pj + step));
                        }
                    }
                }
                filled1.push(i);
                filled2.push(j);
            }
            if added.is_empty() {
                return None;
            }
            residues1 = filled1;
            residues2 = filled2;
            added
        }
    };

    let optimization = &context.config.optimization;
    let candidate = rebuild(context, block, residues1, residues2, block.afps().to_vec())?;
    if candidate.rmsd() > optimization.extension_rmsd_cut {
        return None;
    }
    let (added1, added2): (Vec<usize>, Vec<usize>) = added.into_iter().unzip();
    let fits = candidate
        .transform()
        .deviations(&context.chain1.gather(&added1), &context.chain2.gather(&added2))
        .into_iter()
        .all(|d| d <= optimization.extension_distance_cut);
    fits.then(|| replaced(blocks, index, vec![candidate]))
}

fn split_pass(context: &AlignmentContext, afps: &[Afp], state: &mut AlignmentState) -> bool {
    let optimization = &context.config.optimization;
    let weights = &context.config.scoring;
    let max_twists = context.config.effective_max_twists();
    let mut accepted = false;
    let mut index = 0;
    while index < state.blocks().len() {
        if state.blocks().len() > max_twists {
            break;
        }
        let block = &state.blocks()[index];
        if block.rmsd() > optimization.split_rmsd_cut {
            if let Some(candidate) = best_split(context, afps, state.blocks(), index) {
                if state.try_replace(candidate, weights) {
                    accepted = true;
                    continue;
                }
            }
        }
        index += 1;
    }
    accepted
}

fn best_split(
    context: &AlignmentContext,
    afps: &[Afp],
    blocks: &[Block],
    index: usize,
) -> Option<Vec<Block>> {
    let min = context.config.optimization.min_block_size;
    let weights = &context.config.scoring;
    let block = &blocks[index];
    if block.len() < 2 * min {
        return None;
    }

    let mut best: Option<(f64, Vec<Block>)> = None;
    for k in min..=(block.len() - min) {
        let right_start = block.residues1()[k];
        let (left_afps, right_afps): (Vec<usize>, Vec<usize>) = block
            .afps()
            .iter()
            .copied()
            .partition(|&a| afps.get(a).is_some_and(|afp| afp.start1 < right_start));
        let Some(left) = rebuild(
            context,
            block,
            block.residues1()[..k].to_vec(),
            block.residues2()[..k].to_vec(),
            left_afps,
        ) else {
            continue;
        };
        let Some(right) = rebuild(
            context,
            block,
            block.residues1()[k..].to_vec(),
            block.residues2()[k..].to_vec(),
            right_afps,
        ) else {
            continue;
        };
        let candidate = replaced(blocks, index, vec![left, right]);
        let score = global_score(&candidate, weights);
        if best.as_ref().is_none_or(|(s, _)| score > *s) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

fn merge_pass(context: &AlignmentContext, state: &mut AlignmentState) -> bool {
    let weights = &context.config.scoring;
    let mut accepted = false;
    let mut index = 0;
    while index + 1 < state.blocks().len() {
        if let Some(candidate) = merged(context, state.blocks(), index) {
            if state.try_replace(candidate, weights) {
                accepted = true;
                continue;
            }
        }
        index += 1;
    }
    accepted
}

fn merged(context: &AlignmentContext, blocks: &[Block], index: usize) -> Option<Vec<Block>> {
    let optimization = &context.config.optimization;
    let (a, b) = (&blocks[index], &blocks[index + 1]);

    let angle = rotation_angle_between(&a.transform().rotation, &b.transform().rotation);
    if angle >= optimization.merge_angle_tolerance {
        return None;
    }

    let residues1: Vec<usize> = a.residues1().iter().chain(b.residues1()).copied().collect();
    let residues2: Vec<usize> = a.residues2().iter().chain(b.residues2()).copied().collect();
    let center = centroid(&context.chain2.gather(&residues2))?;
    let shift = (a.transform().apply(&center) - b.transform().apply(&center)).norm();
    if shift >= optimization.merge_shift_tolerance {
        return None;
    }
    if count_internal_gaps(&residues1, &residues2) > context.config.chaining.max_gap_length {
        return None;
    }

    let afps = a.afps().iter().chain(b.afps()).copied().collect();
    let union = rebuild(context, a, residues1, residues2, afps)?;
    let mut candidate = blocks.to_vec();
    candidate.splice(index..index + 2, [union]);
    Some(candidate)
}

fn trim_pass(context: &AlignmentContext, state: &mut AlignmentState) -> bool {
    let weights = &context.config.scoring;
    let mut accepted = false;
    for index in 0..state.blocks().len() {
        while let Some(candidate) = trimmed(context, state.blocks(), index) {
            if !state.try_replace(candidate, weights) {
                break;
            }
            accepted = true;
        }
    }
    accepted
}

fn trimmed(context: &AlignmentContext, blocks: &[Block], index: usize) -> Option<Vec<Block>> {
    let optimization = &context.config.optimization;
    let block = &blocks[index];
    if block.len() <= optimization.min_block_size {
        return None;
    }

    let fixed = context.chain1.gather(block.residues1());
    let moved = block.transform().apply_all(&context.chain2.gather(block.residues2()));
    let (worst, deviation) = find_max_deviation(&fixed, &moved)?;
    if deviation <= optimization.trim_distance_cut {
        return None;
    }

    let mut residues1 = block.residues1().to_vec();
    let mut residues2 = block.residues2().to_vec();
    residues1.remove(worst);
    residues2.remove(worst);
    if count_internal_gaps(&residues1, &residues2) > context.config.chaining.max_gap_length {
        return None;
    }
    let candidate = rebuild(context, block, residues1, residues2, block.afps().to_vec())?;
    Some(replaced(blocks, index, vec![candidate]))
}

fn rebuild(
    context: &AlignmentContext,
    original: &Block,
    residues1: Vec<usize>,
    residues2: Vec<usize>,
    afps: Vec<usize>,
) -> Option<Block> {
    Block::build(
        context.chain1,
        context.chain2,
        residues1,
        residues2,
        afps,
        &context.config.scoring,
    )
    .map_err(|e| trace!("Rejected modification of block at {:?}: {}", original.first(), e))
    .ok()
}

fn replaced(blocks: &[Block], index: usize, with: Vec<Block>) -> Vec<Block> {
    let mut candidate = blocks.to_vec();
    candidate.splice(index..=index, with);
    candidate
}
