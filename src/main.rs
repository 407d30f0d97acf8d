//! ReactorStats - operating-history statistics for a nuclear reactor
//!
//! A CLI tool that reads the yearly operating history of one reactor from
//! an IAEA PRIS page, computes descriptive statistics of its annual time
//! online, and writes them to a spreadsheet with a column chart.
//!
//! Exit codes:
//!   0 - Success, or the page could not be fetched (message printed)
//!   1 - Runtime error (malformed table, config, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod extract;
mod models;
mod pipeline;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use error::PipelineError;
use extract::{ColumnLayout, HttpRowSource, RowSource};
use models::Report;
use report::{ChartSettings, JsonRenderer, ReportRenderer, XlsxRenderer};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so the config file can turn on verbose output
    let (mut config, config_path) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("ReactorStats v{}", env!("CARGO_PKG_VERSION"));
    match config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    debug!("Arguments: {:?}", args);

    match run(&args, &config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .reactorstats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the whole pipeline and write the report. Returns the exit code.
async fn run(args: &Args, config: &Config) -> Result<i32> {
    config.validate().context("Invalid configuration")?;

    let source = HttpRowSource::new(&config.source, !args.quiet)?;
    execute(&source, args.format, config, &mut io::stdout()).await
}

/// Run the pipeline against `source`, write the report and print the outcome
/// to `out`. Returns the exit code.
async fn execute<S: RowSource, W: Write>(
    source: &S,
    format: OutputFormat,
    config: &Config,
    out: &mut W,
) -> Result<i32> {
    let url = config.source.url.as_str();
    let output = PathBuf::from(&config.general.output);
    let layout = config.report.layout;

    let columns = ColumnLayout::from(&config.source);
    debug!("Column layout: {:?}, hours layout: {}", columns, layout);

    let report = match pipeline::run(source, url, &columns, layout).await {
        Ok(report) => report,
        Err(PipelineError::DataFormat(e)) => {
            return Err(e).context("Operating history table has an unexpected shape");
        }
        Err(e) => {
            // Fetch failures and empty tables both mean "no data available".
            warn!("No data available: {}", e);
            writeln!(out, "{}", e)?;

            if !config.general.allow_empty {
                return Ok(0);
            }
            Report::empty(url, layout)
        }
    };

    write_report(&report, &output, format, config)?;
    writeln!(out, "{} created.", output.display())?;

    Ok(0)
}

/// Render the report with the renderer for `format`.
fn write_report(
    report: &Report,
    path: &Path,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let renderer: Box<dyn ReportRenderer> = match format {
        OutputFormat::Xlsx => Box::new(XlsxRenderer::new(ChartSettings::from(&config.report))),
        OutputFormat::Json => Box::new(JsonRenderer),
    };

    renderer
        .render(report, path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    info!(
        "Wrote {} records to {}",
        report.metadata.record_count,
        path.display()
    );
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Returns the path the configuration came from, if any.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, Some(config_path.clone())));
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => Ok((config, Some(PathBuf::from(DEFAULT_CONFIG_FILE)))),
        None => Ok((Config::default(), None)),
    }
}
