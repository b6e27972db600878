use super::align;
use crate::core::models::coords::CoordinateSet;
use crate::core::models::result::AlignmentResult;
use crate::engine::config::AlignmentConfig;
use crate::engine::context::CancellationToken;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::cmp::Ordering;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One target that aligned successfully.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub target: String,
    pub result: AlignmentResult,
}

/// One target whose alignment failed.
#[derive(Debug)]
pub struct SearchFailure {
    pub target: String,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Sorted by descending score, then by target name.
    pub hits: Vec<SearchHit>,
    pub failures: Vec<SearchFailure>,
}

impl SearchOutcome {
    pub fn significant_hits(&self) -> impl Iterator<Item = &SearchHit> {
        self.hits.iter().filter(|hit| hit.result.is_significant())
    }
}

/// Aligns `query` against every target independently.
///
/// Alignments run in parallel when the `parallel` feature is enabled. A failing target
/// is recorded in [`SearchOutcome::failures`] and does not stop the search, except for
/// cancellation, which is returned as an error.
#[instrument(skip_all, name = "search_workflow", fields(query = query.name(), targets = targets.len()))]
pub fn run(
    query: &CoordinateSet,
    targets: &[CoordinateSet],
    config: &AlignmentConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<SearchOutcome, EngineError> {
    config.validate()?;
    reporter.report(Progress::PhaseStart { name: "Search" });
    reporter.report(Progress::TaskStart {
        total_steps: targets.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = targets.iter();

    #[cfg(feature = "parallel")]
    let iterator = targets.par_iter();

    let results: Vec<(String, Result<AlignmentResult, EngineError>)> = iterator
        .map(|target| {
            let silent = ProgressReporter::new();
            let result = align::run(query, target, config, &silent, cancel);
            reporter.report(Progress::TaskIncrement);
            (target.name().to_string(), result)
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let mut outcome = SearchOutcome::default();
    for (target, result) in results {
        match result {
            Ok(result) => outcome.hits.push(SearchHit { target, result }),
            Err(EngineError::Cancelled { phase }) => return Err(EngineError::Cancelled { phase }),
            Err(error) => {
                warn!("Alignment against '{}' failed: {}", target, error);
                outcome.failures.push(SearchFailure { target, error });
            }
        }
    }
    outcome.hits.sort_by(|a, b| {
        b.result
            .score()
            .partial_cmp(&a.result.score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.target.cmp(&b.target))
    });

    info!(
        hits = outcome.hits.len(),
        significant = outcome.significant_hits().count(),
        failures = outcome.failures.len(),
        "Search finished."
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{moved, random_cloud, random_walk, slice};
    use nalgebra::Vector3;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn library(query: &CoordinateSet) -> Vec<CoordinateSet> {
        vec![
            random_cloud("noise", 30, 100.0, 3),
            moved(query, "full", Vector3::new(0.1, 0.2, 0.3), Vector3::new(1.0, 1.0, 1.0)),
            slice(query, "half", 0..25),
            random_walk("tiny", 4, 9),
        ]
    }

    #[test]
    fn hits_are_sorted_by_descending_score() {
        let query = random_walk("query", 50, 17);
        let targets = library(&query);
        let outcome = run(
            &query,
            &targets,
            &AlignmentConfig::default(),
            &ProgressReporter::new(),
            &CancellationToken::new(),
        )
        .unwrap();

        let names: Vec<&str> = outcome.hits.iter().map(|h| h.target.as_str()).collect();
        assert_eq!(names, vec!["full", "half", "noise"]);
        assert!(outcome.hits.windows(2).all(|w| w[0].result.score() >= w[1].result.score()));
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].target, "tiny");
        assert!(matches!(outcome.failures[0].error, EngineError::InsufficientData { .. }));
    }

    #[test]
    fn significant_hits_exclude_short_alignments() {
        let query = random_walk("query", 50, 17);
        let targets = library(&query);
        let outcome = run(
            &query,
            &targets,
            &AlignmentConfig::default(),
            &ProgressReporter::new(),
            &CancellationToken::new(),
        )
        .unwrap();
        assert!(outcome.significant_hits().all(|h| h.target != "noise"));
        assert!(outcome.significant_hits().any(|h| h.target == "full"));
    }

    #[test]
    fn each_target_reports_one_increment() {
        let query = random_walk("query", 50, 17);
        let targets = library(&query);
        let increments = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if matches!(event, Progress::TaskIncrement) {
                increments.fetch_add(1, AtomicOrdering::Relaxed);
            }
        }));
        run(&query, &targets, &AlignmentConfig::default(), &reporter, &CancellationToken::new()).unwrap();
        drop(reporter);
        assert_eq!(increments.into_inner(), targets.len());
    }

    #[test]
    fn cancellation_aborts_the_search() {
        let query = random_walk("query", 50, 17);
        let targets = library(&query);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = run(&query, &targets, &AlignmentConfig::default(), &ProgressReporter::new(), &cancel);
        assert!(matches!(result, Err(EngineError::Cancelled { .. })));
    }
}
