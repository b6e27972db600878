use super::{load_chain, load_named_chain};
use crate::cli::SearchArgs;
use crate::config::PartialAlignConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use afpalign::core::io::manifest::{SearchTarget, load_manifest};
use afpalign::core::models::coords::CoordinateSet;
use afpalign::core::report::db;
use afpalign::engine::context::CancellationToken;
use afpalign::engine::progress::ProgressReporter;
use afpalign::workflows;
use afpalign::workflows::search::SearchOutcome;
use tracing::{info, warn};

pub fn run(args: SearchArgs, show_progress: bool) -> Result<()> {
    let config = PartialAlignConfig::load(args.options.config.as_deref())?
        .merge_with_cli(&args.options)?;

    let query = load_chain(&args.query, args.query_chain)?;
    let manifest = load_manifest(&args.targets)?;
    info!("Manifest lists {} target(s).", manifest.len());

    let targets = load_targets(&manifest);

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let outcome = workflows::search::run(
        &query,
        &targets,
        &config,
        &reporter,
        &CancellationToken::new(),
    );
    progress_handler.clear();
    let outcome = outcome?;

    for line in hit_lines(&outcome, args.only_significant) {
        print!("{}", line);
    }
    Ok(())
}

/// Loads every manifest target that can be read. Unreadable targets are logged and skipped.
fn load_targets(manifest: &[SearchTarget]) -> Vec<CoordinateSet> {
    manifest
        .iter()
        .filter_map(
            |target| match load_named_chain(&target.path, &target.name, target.chain) {
                Ok(chain) => Some(chain),
                Err(e) => {
                    warn!("Skipping target '{}': {}", target.name, e);
                    None
                }
            },
        )
        .collect()
}

fn hit_lines(outcome: &SearchOutcome, only_significant: bool) -> Vec<String> {
    outcome
        .hits
        .iter()
        .filter(|hit| !only_significant || hit.result.is_significant())
        .map(|hit| db::db_search_line(&hit.result))
        .collect()
}
