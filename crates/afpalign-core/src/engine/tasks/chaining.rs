use super::graph::AfpGraph;
use crate::core::models::afp::Afp;
use crate::core::models::block::Block;
use crate::core::models::result::InitialChain;
use crate::core::superposition::superpose;
use crate::core::utils::geometry::pooled_rmsd;
use crate::engine::context::AlignmentContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

/// Scores closer than this are treated as equal and tie-broken structurally.
const TIE_EPSILON: f64 = 1e-6;

/// Best chain ending at one fragment.
#[derive(Debug, Clone, Copy)]
struct Cell {
    score: f64,
    twists: usize,
    aligned: usize,
    /// Gap accumulated since the last twist.
    block_gap: usize,
    prev: Option<usize>,
    /// Whether the step from `prev` to this fragment is a twist.
    twist_before: bool,
}

impl Cell {
    fn start(afp: &Afp) -> Self {
        Self {
            score: afp.score,
            twists: 0,
            aligned: afp.len,
            block_gap: 0,
            prev: None,
            twist_before: false,
        }
    }

    /// Higher score first; then fewer twists; then more aligned residues.
    fn is_better_than(&self, other: &Cell) -> bool {
        if self.score > other.score + TIE_EPSILON {
            return true;
        }
        if self.score < other.score - TIE_EPSILON {
            return false;
        }
        if self.twists != other.twists {
            return self.twists < other.twists;
        }
        self.aligned > other.aligned
    }
}

/// The chained fragments cut into rigid blocks.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    pub initial: InitialChain,
    pub blocks: Vec<Block>,
}

/// Finds the best-scoring chain of fragments and decomposes it into blocks at its twists.
///
/// Returns `Ok(None)` when there is no fragment, or when no block of the chain can be
/// superposed.
#[instrument(skip_all, name = "chaining_task")]
pub fn run(context: &AlignmentContext, graph: &AfpGraph) -> Result<Option<ChainOutcome>, EngineError> {
    if graph.is_empty() {
        return Ok(None);
    }
    context.reporter.report(Progress::TaskStart {
        total_steps: graph.len() as u64,
    });
    let cells = fill_cells(context, graph);
    context.reporter.report(Progress::TaskFinish);
    let cells = cells?;

    let Some(terminal) = best_terminal(&cells) else {
        return Ok(None);
    };
    let chain = backtrack(&cells, terminal);
    debug!(
        "Best chain: {} fragments, {} twists, score {:.2}.",
        chain.len(),
        cells[terminal].twists,
        cells[terminal].score
    );

    let blocks = build_blocks(context, graph, &cells, &chain);
    if blocks.is_empty() {
        return Ok(None);
    }

    let aligned_len = blocks.iter().map(Block::len).sum();
    let rmsd = pooled_rmsd(blocks.iter().map(|b| (b.len(), b.rmsd())));
    let residues1: Vec<usize> = blocks.iter().flat_map(|b| b.residues1().iter().copied()).collect();
    let residues2: Vec<usize> = blocks.iter().flat_map(|b| b.residues2().iter().copied()).collect();
    let chain_rmsd = superpose(
        &context.chain1.gather(&residues1),
        &context.chain2.gather(&residues2),
    )
    .map(|fit| fit.rmsd)
    .unwrap_or(rmsd);

    Ok(Some(ChainOutcome {
        initial: InitialChain {
            afp_count: chain.len(),
            block_count: blocks.len(),
            aligned_len,
            rmsd,
            chain_rmsd,
        },
        blocks,
    }))
}

fn fill_cells(context: &AlignmentContext, graph: &AfpGraph) -> Result<Vec<Cell>, EngineError> {
    let config = context.config;
    let weights = &config.scoring;
    let max_twists = config.effective_max_twists();
    let max_gap = config.chaining.max_gap_length;

    let mut cells: Vec<Cell> = Vec::with_capacity(graph.len());
    for (index, afp) in graph.afps().iter().enumerate() {
        context.ensure_active("fragment chaining")?;
        let mut best = Cell::start(afp);
        for p in graph.predecessors(index) {
            let from = &cells[p];
            let (g1, g2) = graph.get(p).gaps_to(afp);
            let gap = g1.max(g2);
            let twist = from.block_gap + gap > max_gap || is_twist(context, graph.get(p), afp);
            let twists = from.twists + usize::from(twist);
            if twists > max_twists {
                continue;
            }
            let candidate = Cell {
                score: from.score + afp.score
                    - weights.gap_penalty * gap as f64
                    - if twist { weights.twist_penalty } else { 0.0 },
                twists,
                aligned: from.aligned + afp.len,
                block_gap: if twist { 0 } else { from.block_gap + gap },
                prev: Some(p),
                twist_before: twist,
            };
            if candidate.is_better_than(&best) {
                best = candidate;
            }
        }
        cells.push(best);
        context.reporter.report(Progress::TaskIncrement);
    }
    Ok(cells)
}

/// Whether the transform of `from` fails to superpose the windows of `to`.
fn is_twist(context: &AlignmentContext, from: &Afp, to: &Afp) -> bool {
    let window1 = &context.chain1.points()[to.start1..to.end1()];
    let window2 = &context.chain2.points()[to.start2..to.end2()];
    from.transform
        .rmsd(window1, window2)
        .is_none_or(|rmsd| rmsd > context.config.chaining.twist_rmsd_cut)
}

fn best_terminal(cells: &[Cell]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, cell) in cells.iter().enumerate() {
        if best.is_none_or(|b| cell.is_better_than(&cells[b])) {
            best = Some(index);
        }
    }
    best
}

fn backtrack(cells: &[Cell], terminal: usize) -> Vec<usize> {
    let mut chain = vec![terminal];
    let mut current = terminal;
    while let Some(prev) = cells[current].prev {
        chain.push(prev);
        current = prev;
    }
    chain.reverse();
    chain
}

fn build_blocks(
    context: &AlignmentContext,
    graph: &AfpGraph,
    cells: &[Cell],
    chain: &[usize],
) -> Vec<Block> {
    let mut segments: Vec<Vec<usize>> = Vec::new();
    for &index in chain {
        match segments.last_mut() {
            Some(segment) if !cells[index].twist_before => segment.push(index),
            _ => segments.push(vec![index]),
        }
    }

    segments
        .into_iter()
        .filter_map(|segment| {
            let (residues1, residues2): (Vec<usize>, Vec<usize>) = segment
                .iter()
                .flat_map(|&i| graph.get(i).pairs())
                .unzip();
            match Block::build(
                context.chain1,
                context.chain2,
                residues1,
                residues2,
                segment.clone(),
                &context.config.scoring,
            ) {
                Ok(block) => Some(block),
                Err(e) => {
                    debug!("Discarding degenerate block of fragments {:?}: {}", segment, e);
                    None
                }
            }
        })
        .collect()
}
