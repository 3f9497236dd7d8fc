use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use pypi_search::pypi::{DEFAULT_INDEX_URL, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_SECS, render};
use pypi_search::{PypiSearch, SearchError};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Search pypi.org for packages matching a query
#[derive(Parser)]
#[command(name = "pypi-search", version)]
struct Cli {
    /// The package name to search on pypi.org
    query: OsString,

    /// The max number of results to show
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: NonZeroUsize,

    /// Base URL of the package index
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: NonZeroU64,

    /// Python interpreter whose installed packages are flagged
    #[arg(long)]
    python: Option<PathBuf>,

    /// When to color the output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run(cli) {
        std::process::exit(report(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut search = PypiSearch::query(cli.query)?
        .max_results(cli.max_results)
        .index_url(&cli.index_url)
        .timeout(Duration::from_secs(cli.timeout.get()));
    if let Some(python) = cli.python {
        search = search.python(python);
    }

    let records = runtime.block_on(search.search())?;
    println!("{}", render(&records, cli.color.enabled()));
    Ok(())
}

/// Print the failure and pick the exit code
fn report(error: &anyhow::Error) -> i32 {
    let Some(error) = error.downcast_ref::<SearchError>() else {
        eprintln!("error: {:#}", error);
        return 2;
    };

    match error {
        SearchError::EmptyResult => eprintln!("\nResult not found\n"),
        SearchError::Usage(message) => {
            eprintln!("error: {}\n\n{}", message, Cli::command().render_usage());
        }
        other => eprintln!("error: {}", other),
    }
    error.exit_code()
}
