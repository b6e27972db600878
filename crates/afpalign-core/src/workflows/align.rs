use crate::core::models::coords::CoordinateSet;
use crate::core::models::result::{AlignmentParts, AlignmentResult};
use crate::core::utils::geometry::pooled_rmsd;
use crate::engine::config::AlignmentConfig;
use crate::engine::context::{AlignmentContext, CancellationToken};
use crate::engine::distance::DistanceMatrix;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::significance;
use crate::engine::tasks::{chaining, fragments, graph::AfpGraph, optimization};
use tracing::{info, instrument};

/// Aligns `chain2` onto `chain1`.
///
/// Runs the full pipeline: distance matrices, fragment detection, chaining, block
/// optimization and significance estimation. An alignment that finds no fragment, no
/// chain or no viable block is returned as a short result rather than an error.
///
/// # Errors
///
/// - [`EngineError::Config`] if `config` does not validate.
/// - [`EngineError::InsufficientData`] if either chain is shorter than the fragment length.
/// - [`EngineError::Cancelled`] if `cancel` fires while the alignment runs.
#[instrument(skip_all, name = "alignment_workflow", fields(chain1 = chain1.name(), chain2 = chain2.name()))]
pub fn run(
    chain1: &CoordinateSet,
    chain2: &CoordinateSet,
    config: &AlignmentConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<AlignmentResult, EngineError> {
    config.validate()?;
    let algorithm = config.algorithm;
    let fragment_length = config.fragment.length;

    // === Phase 0: Distance matrices ===
    let (distances1, distances2) = reporter.phase("Distance matrices", || {
        Ok::<_, EngineError>((
            DistanceMatrix::build(chain1, fragment_length)?,
            DistanceMatrix::build(chain2, fragment_length)?,
        ))
    })?;
    let context = AlignmentContext::new(
        chain1,
        chain2,
        &distances1,
        &distances2,
        config,
        reporter,
        cancel,
    );
    info!(
        "Aligning {} ({} residues) with {} ({} residues) using {}.",
        chain1.name(),
        chain1.len(),
        chain2.name(),
        chain2.len(),
        algorithm
    );

    // === Phase 1: Fragment detection ===
    let afps = reporter.phase("Fragment detection", || fragments::run(&context))?;
    let afp_count = afps.len();
    if afps.is_empty() {
        info!("No aligned fragment pairs found; reporting a short alignment.");
        return Ok(AlignmentResult::insignificant(
            algorithm,
            chain1,
            chain2,
            0,
            fragment_length,
        ));
    }

    // === Phase 2: Fragment chaining ===
    let graph = AfpGraph::new(afps, config.chaining.max_gap_length);
    let Some(chain) = reporter.phase("Fragment chaining", || chaining::run(&context, &graph))?
    else {
        info!("No fragment chain could be superposed; reporting a short alignment.");
        return Ok(AlignmentResult::insignificant(
            algorithm,
            chain1,
            chain2,
            afp_count,
            fragment_length,
        ));
    };
    info!(
        "Initial chain: {} fragments in {} blocks, {} residues.",
        chain.initial.afp_count, chain.initial.block_count, chain.initial.aligned_len
    );

    // === Phase 3: Block optimization ===
    let optimized = reporter.phase("Block optimization", || {
        optimization::run(&context, graph.afps(), chain.blocks)
    })?;
    if optimized.blocks.is_empty() {
        info!("No block survived optimization; reporting a short alignment.");
        return Ok(AlignmentResult::insignificant(
            algorithm,
            chain1,
            chain2,
            afp_count,
            fragment_length,
        ));
    }

    // === Phase 4: Significance ===
    reporter.report(Progress::PhaseStart {
        name: "Significance",
    });
    let aligned: usize = optimized.blocks.iter().map(|b| b.len()).sum();
    let total_rmsd = pooled_rmsd(optimized.blocks.iter().map(|b| (b.len(), b.rmsd())));
    let significance = significance::evaluate(
        algorithm.significance(),
        optimized.score,
        aligned,
        total_rmsd,
        chain1.len().min(chain2.len()),
        &config.significance,
    );
    reporter.report(Progress::PhaseFinish);

    let result = AlignmentResult::assemble(
        AlignmentParts {
            algorithm,
            afp_count,
            fragment_length,
            initial: chain.initial,
            blocks: optimized.blocks,
            score: optimized.score,
            total_rmsd,
            significance,
            trace: optimized.trace,
        },
        chain1,
        chain2,
    );
    info!(
        "Alignment finished: {} blocks, {} equivalent residues, RMSD {:.2}.",
        result.block_count(),
        result.nr_eqr(),
        result.total_rmsd()
    );
    Ok(result)
}

/// Runs [`run`] without progress reporting or cancellation.
pub fn align(
    chain1: &CoordinateSet,
    chain2: &CoordinateSet,
    config: &AlignmentConfig,
) -> Result<AlignmentResult, EngineError> {
    run(
        chain1,
        chain2,
        config,
        &ProgressReporter::new(),
        &CancellationToken::new(),
    )
}
