use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::sync::Arc;

use nre::report::{write_report, ConsoleProgress, LogProgress, NullProgress};
use nre::search::{run_parallel_search, SearchConfig, SearchResult, SentinelPolicy};
use nre::{FunctionLibrary, Rendering};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "nre")]
#[command(about = "nre - find the closed-form expression closest to a number")]
#[command(version)]
struct Args {
    /// The number to reverse engineer
    #[arg(long, short, allow_negative_numbers = true, default_value = "2.03509033057")]
    target: f64,

    /// Number of expressions to try, across all workers
    #[arg(long, short, default_value = "100000000")]
    limit: u64,

    /// Number of worker threads (0 = one per CPU)
    #[arg(long = "threads", short = 'j', default_value = "4")]
    threads: usize,

    /// Number of results to keep and report
    #[arg(long, short, default_value = "40")]
    keep: usize,

    /// Value standing in for a malformed expression
    #[arg(long, allow_negative_numbers = true, default_value = "0")]
    default_value: f64,

    /// Also rank expressions that evaluate exactly to the default value
    #[arg(long)]
    keep_default: bool,

    /// Store size at which a worker cuts its results back to --keep
    #[arg(long, default_value = "10000000")]
    cleanup: usize,

    /// Iterations between progress updates
    #[arg(long, default_value = "1000000")]
    progress: u64,

    /// Function library to build expressions from
    #[arg(long, value_enum, default_value = "standard")]
    library: CliLibrary,

    /// Extra constant added to the library, as NAME=VALUE (repeatable)
    #[arg(long = "constant", short = 'c')]
    constants: Vec<String>,

    /// How expressions are printed
    #[arg(long, value_enum, default_value = "letters")]
    render: CliRendering,

    /// How progress is shown while searching
    #[arg(long, value_enum, default_value = "console")]
    progress_mode: CliProgress,

    /// Print search statistics after the results
    #[arg(long)]
    stats: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

/// CLI library selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLibrary {
    /// 0, 1, pi, e, sqrt, add, sub, mul, div, pow
    Standard,
    /// 0, 1, add
    Arithmetic,
}

/// CLI rendering selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliRendering {
    /// One letter per symbol (A = first nullary function)
    Letters,
    /// Function names separated by spaces
    Names,
}

impl From<CliRendering> for Rendering {
    fn from(cli: CliRendering) -> Self {
        match cli {
            CliRendering::Letters => Rendering::Letters,
            CliRendering::Names => Rendering::Names,
        }
    }
}

/// CLI progress display selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliProgress {
    /// Redraw one terminal row per worker
    Console,
    /// Emit progress as log events
    Log,
    /// No progress output
    Off,
}

fn build_library(args: &Args) -> Result<FunctionLibrary> {
    let mut builder = match args.library {
        CliLibrary::Standard => FunctionLibrary::standard_builder(),
        CliLibrary::Arithmetic => FunctionLibrary::arithmetic_builder(),
    };
    for constant in &args.constants {
        builder = builder.parse_constant(constant)?;
    }
    Ok(builder.build()?)
}

fn build_config(args: &Args) -> SearchConfig {
    let policy = if args.keep_default {
        SentinelPolicy::MalformedOnly
    } else {
        SentinelPolicy::DiscardDefault
    };
    SearchConfig::default()
        .with_target(args.target)
        .with_limit(args.limit)
        .with_threads(args.threads)
        .with_keep(args.keep)
        .with_default_value(args.default_value)
        .with_cleanup_interval(args.cleanup)
        .with_progress_interval(args.progress)
        .with_sentinel_policy(policy)
}

fn run(args: &Args, library: Arc<FunctionLibrary>, config: &SearchConfig) -> Result<SearchResult> {
    let rendering = args.render.into();
    let result = match args.progress_mode {
        CliProgress::Console => {
            let mut console = ConsoleProgress::stderr(Arc::clone(&library), rendering);
            console.clear()?;
            let result = run_parallel_search(library, config, &mut console);
            console.clear()?;
            result
        }
        CliProgress::Log => {
            let mut sink = LogProgress::new(Arc::clone(&library), rendering);
            run_parallel_search(library, config, &mut sink)
        }
        CliProgress::Off => run_parallel_search(library, config, &mut NullProgress),
    };
    Ok(result?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let library = Arc::new(build_library(&args).context("invalid function library")?);
    let config = build_config(&args);
    config.validate().context("invalid search configuration")?;
    tracing::debug!(?library, ?config, "configuration");

    let result = run(&args, Arc::clone(&library), &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &result.ranked, &library, args.render.into())?;

    if args.stats {
        writeln!(out, "\nSearch Statistics:")?;
        for line in result.statistics.format_summary().lines() {
            writeln!(out, "  {}", line)?;
        }
        for (worker_id, stats) in result.worker_statistics.iter().enumerate() {
            writeln!(
                out,
                "  Worker {}: {} evaluated, {} inserted, {} compactions",
                worker_id, stats.candidates_evaluated, stats.inserted, stats.compactions
            )?;
        }
    }

    Ok(())
}
