use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "AFPAlign CLI - Flexible and rigid protein structure alignment by chaining aligned fragment pairs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel searches.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align two protein chains and print a report.
    Align(AlignArgs),
    /// Align one query chain against every target listed in a manifest.
    Search(SearchArgs),
}

/// Report layouts understood by `align`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// CE-style report with rotation operators.
    Ce,
    /// FatCat-style report with block statistics.
    #[default]
    Fatcat,
    /// One-line summary.
    Summary,
    /// Tab-separated database search line.
    Db,
}

/// Options shared by every command that runs alignments.
#[derive(Args, Debug, Clone, Default)]
pub struct AlignmentOptions {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the alignment algorithm (ce, ce-sidechain, fatcat-rigid, fatcat-flexible).
    #[arg(short, long, value_name = "NAME")]
    pub algorithm: Option<String>,

    /// Override the fragment length.
    #[arg(long, value_name = "INT")]
    pub fragment_length: Option<usize>,

    /// Override the maximum number of twists.
    #[arg(long, value_name = "INT")]
    pub max_twists: Option<usize>,

    /// Set a specific configuration value, overriding the config file and other flags.
    /// Can be used multiple times. Example: -S optimization.max-iterations=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Path to the first structure (PDB format).
    #[arg(long = "chain1", required = true, value_name = "PATH")]
    pub chain1: PathBuf,

    /// Chain identifier to read from the first structure.
    #[arg(long, value_name = "ID")]
    pub chain1_id: Option<char>,

    /// Path to the second structure (PDB format).
    #[arg(long = "chain2", required = true, value_name = "PATH")]
    pub chain2: PathBuf,

    /// Chain identifier to read from the second structure.
    #[arg(long, value_name = "ID")]
    pub chain2_id: Option<char>,

    /// Report layout to print.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Fatcat)]
    pub format: ReportFormat,

    /// Write the second chain, superposed onto the first, to this PDB file.
    #[arg(long, value_name = "PATH")]
    pub superposed: Option<PathBuf>,

    #[command(flatten)]
    pub options: AlignmentOptions,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Path to the query structure (PDB format).
    #[arg(long, required = true, value_name = "PATH")]
    pub query: PathBuf,

    /// Chain identifier to read from the query structure.
    #[arg(long, value_name = "ID")]
    pub query_chain: Option<char>,

    /// Tab-separated target manifest: name, path and optional chain per line.
    #[arg(long, required = true, value_name = "TSV")]
    pub targets: PathBuf,

    /// Print significant hits only.
    #[arg(long)]
    pub only_significant: bool,

    #[command(flatten)]
    pub options: AlignmentOptions,
}
