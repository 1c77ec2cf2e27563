//! tokentally — count LLM tokens per file extension.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tokentally::config::RunConfig;
use tokentally::filter::{FilterOptions, FilterState};
use tokentally::output::OutputOptions;
use tokentally::tokenize::{BpeTokenizer, ModelId};
use tokentally::walk::{FsReader, WalkErrors};
use tokentally::{output, scan};

/// Exit status for configuration errors.
const EXIT_CONFIG: i32 = 1;

// ─── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "tokentally",
    about = "Count the tokens in a directory per file type, with a grand total and \
             the headroom left in a 128K context window",
    version
)]
struct Cli {
    /// Relative or absolute path of the directory to scan.
    directory: String,

    /// Log every file as it is read.
    #[arg(short, long)]
    verbose: bool,

    /// Skip files and directories with "old" anywhere in their path.
    #[arg(long = "exclude_old", visible_alias = "exclude-old")]
    exclude_old: bool,

    /// File extension to leave out (repeatable).
    #[arg(short = 'e', long = "exclude", value_name = "EXT", conflicts_with = "include")]
    exclude: Vec<String>,

    /// File extension to count; all others are left out (repeatable).
    #[arg(short = 'i', long = "include", value_name = "EXT")]
    include: Vec<String>,

    /// Model whose tokenizer approximates the counts.
    #[arg(short, long, value_enum, default_value_t = ModelId::Gpt4o)]
    model: ModelId,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over
/// `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,tokentally={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let filter = FilterOptions::new(cli.exclude_old, cli.exclude, cli.include);
    let config = match RunConfig::new(&cli.directory, filter, cli.model) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(EXIT_CONFIG);
        }
    };

    let tokenizer = match BpeTokenizer::for_model(config.model) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(exitcode::UNAVAILABLE);
        }
    };

    info!(
        "scanning {} with the {} tokenizer ({})",
        config.root.display(),
        tokenizer.model(),
        tokenizer.model().encoding()
    );
    let outcome = scan::scan(
        &config.root,
        FilterState::new(&config.filter),
        &tokenizer,
        &FsReader,
    );
    info!(
        "counted {} files, skipped {}",
        outcome.tally.file_count(),
        outcome.skipped_total()
    );
    if !outcome.learned.is_empty() {
        info!("extensions ignored after decode errors: {}", outcome.learned.join(", "));
    }

    let out_opts = OutputOptions::new(cli.no_color);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = output::write_report(&mut out, &outcome.tally, &out_opts) {
        eprintln!("error writing output: {e}");
        std::process::exit(exitcode::IOERR);
    }

    // Report any non-fatal walk errors as a miette diagnostic.
    if let Some(diag) = WalkErrors::from_errors(&config.root, &outcome.errors) {
        eprintln!("{:?}", miette::Report::new(diag));
    }
}
