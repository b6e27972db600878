use crate::core::models::afp::Afp;
use crate::core::superposition::superpose;
use crate::engine::context::AlignmentContext;
use crate::engine::distance::DistanceMatrix;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument, trace};

/// Mean absolute difference between the internal distances of two windows, skipping
/// distances between sequence neighbours.
pub fn window_dissimilarity(
    distances1: &DistanceMatrix,
    distances2: &DistanceMatrix,
    start1: usize,
    start2: usize,
    len: usize,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in 0..len.saturating_sub(2) {
        for col in (row + 2)..len {
            sum += (distances1.get(start1 + row, start1 + col)
                - distances2.get(start2 + row, start2 + col))
            .abs();
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Lazily enumerates the aligned fragment pairs of two chains in `(start1, start2)` order.
///
/// Each window pair is screened by [`window_dissimilarity`] first; survivors are
/// superposed and kept when their RMSD is below the fragment cutoff. Windows that cannot
/// be superposed are skipped. Cancellation is checked before every window pair and ends
/// the sequence with an error.
#[derive(Clone)]
pub struct FragmentFinder<'a> {
    context: AlignmentContext<'a>,
    len: usize,
    step: usize,
    last1: usize,
    last2: usize,
    next: Option<(usize, usize)>,
}

impl<'a> FragmentFinder<'a> {
    pub fn new(context: AlignmentContext<'a>) -> Self {
        let fragment = &context.config.fragment;
        let len = fragment.length;
        let n1 = context.chain1.len();
        let n2 = context.chain2.len();
        let next = (n1 >= len && n2 >= len && len > 0).then_some((0, 0));
        Self {
            context,
            len,
            step: fragment.step.max(1),
            last1: n1.saturating_sub(len),
            last2: n2.saturating_sub(len),
            next,
        }
    }

    /// Number of chain-1 window starts, one progress step each.
    pub fn rows(&self) -> u64 {
        if self.next.is_none() {
            0
        } else {
            (self.last1 / self.step + 1) as u64
        }
    }

    fn advance(&mut self, i: usize, j: usize) {
        self.next = if j + self.step <= self.last2 {
            Some((i, j + self.step))
        } else {
            self.context.reporter.report(Progress::TaskIncrement);
            (i + self.step <= self.last1).then_some((i + self.step, 0))
        };
    }

    fn evaluate(&self, i: usize, j: usize) -> Option<Afp> {
        let ctx = &self.context;
        let fragment = &ctx.config.fragment;
        let dissimilarity = window_dissimilarity(ctx.distances1, ctx.distances2, i, j, self.len);
        if dissimilarity > fragment.distance_tolerance {
            return None;
        }

        let window1 = &ctx.chain1.points()[i..i + self.len];
        let window2 = &ctx.chain2.points()[j..j + self.len];
        match superpose(window1, window2) {
            Ok(fit) if fit.rmsd < fragment.rmsd_cut => Some(Afp {
                start1: i,
                start2: j,
                len: self.len,
                rmsd: fit.rmsd,
                score: ctx.config.scoring.fragment_score(self.len, fit.rmsd),
                transform: fit.transform,
            }),
            Ok(_) => None,
            Err(e) => {
                trace!("Skipping degenerate fragment ({}, {}): {}", i, j, e);
                None
            }
        }
    }
}

impl Iterator for FragmentFinder<'_> {
    type Item = Result<Afp, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((i, j)) = self.next {
            if let Err(e) = self.context.ensure_active("fragment detection") {
                self.next = None;
                return Some(Err(e));
            }
            self.advance(i, j);
            if let Some(afp) = self.evaluate(i, j) {
                return Some(Ok(afp));
            }
        }
        None
    }
}

/// Collects every fragment of the two chains.
#[instrument(skip_all, name = "fragment_task")]
pub fn run(context: &AlignmentContext) -> Result<Vec<Afp>, EngineError> {
    let finder = FragmentFinder::new(*context);
    context.reporter.report(Progress::TaskStart {
        total_steps: finder.rows(),
    });
    let afps = finder.collect::<Result<Vec<_>, _>>();
    context.reporter.report(Progress::TaskFinish);
    let afps = afps?;
    debug!("Found {} aligned fragment pairs.", afps.len());
    Ok(afps)
}
