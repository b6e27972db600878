use super::load_chain;
use crate::cli::{AlignArgs, ReportFormat};
use crate::config::PartialAlignConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::viewer::PdbExportViewer;
use afpalign::core::models::coords::CoordinateSet;
use afpalign::core::models::result::AlignmentResult;
use afpalign::core::report::{ce, db, fatcat, viewer::AlignmentViewer};
use afpalign::engine::context::CancellationToken;
use afpalign::engine::progress::ProgressReporter;
use afpalign::workflows;
use std::time::Instant;
use tracing::info;

pub fn run(args: AlignArgs, show_progress: bool) -> Result<()> {
    let config = PartialAlignConfig::load(args.options.config.as_deref())?
        .merge_with_cli(&args.options)?;

    let chain1 = load_chain(&args.chain1, args.chain1_id)?;
    let chain2 = load_chain(&args.chain2, args.chain2_id)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core alignment workflow...");
    let started = Instant::now();
    let outcome = workflows::align::run(
        &chain1,
        &chain2,
        &config,
        &reporter,
        &CancellationToken::new(),
    );
    let elapsed_ms = started.elapsed().as_millis();
    progress_handler.clear();
    let result = outcome?;

    print!("{}", render(args.format, &result, &chain1, &chain2, elapsed_ms));

    if let Some(path) = &args.superposed {
        PdbExportViewer::new(path)
            .show(&result, &chain1, &chain2)
            .map_err(|source| CliError::StructureOutput {
                path: path.clone(),
                source,
            })?;
    }
    Ok(())
}

fn render(
    format: ReportFormat,
    result: &AlignmentResult,
    chain1: &CoordinateSet,
    chain2: &CoordinateSet,
    elapsed_ms: u128,
) -> String {
    match format {
        ReportFormat::Ce => ce::render(result, elapsed_ms),
        ReportFormat::Fatcat => fatcat::render(result, chain1, chain2),
        ReportFormat::Summary => result.to_string(),
        ReportFormat::Db => db::db_search_line(result),
    }
}
